//! Hand-written mocks shared by the view-model tests.

#![allow(dead_code)]

use async_trait::async_trait;
use ayursutra_core::api::{
    ClinicApi, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use ayursutra_core::auth::{CurrentUser, UserSessionRepository};
use ayursutra_core::consultation::{ConsultationDraft, RecommendationResponse};
use ayursutra_core::{PortalError, Result};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Scripted `ClinicApi`.
///
/// Each endpoint pops the next queued result; an empty queue is an internal
/// error. With a gate installed, every call parks until [`release`] is called.
///
/// [`release`]: MockClinicApi::release
#[derive(Default)]
pub struct MockClinicApi {
    recommend_results: Mutex<VecDeque<Result<RecommendationResponse>>>,
    register_results: Mutex<VecDeque<Result<RegisterResponse>>>,
    login_results: Mutex<VecDeque<Result<LoginResponse>>>,
    pub recommend_requests: Mutex<Vec<ConsultationDraft>>,
    pub register_requests: Mutex<Vec<RegisterRequest>>,
    pub login_requests: Mutex<Vec<LoginRequest>>,
    calls: AtomicUsize,
    gated: bool,
    started: Notify,
    gate: Notify,
}

impl MockClinicApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls park after recording the request until `release()`.
    pub fn gated() -> Self {
        Self {
            gated: true,
            ..Self::default()
        }
    }

    pub fn push_recommendation(&self, result: Result<RecommendationResponse>) -> &Self {
        self.recommend_results.lock().unwrap().push_back(result);
        self
    }

    pub fn push_register(&self, result: Result<RegisterResponse>) -> &Self {
        self.register_results.lock().unwrap().push_back(result);
        self
    }

    pub fn push_login(&self, result: Result<LoginResponse>) -> &Self {
        self.login_results.lock().unwrap().push_back(result);
        self
    }

    /// Total number of requests sent to any endpoint.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Waits until a gated call has been entered.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.gated {
            self.started.notify_one();
            self.gate.notified().await;
        }
    }
}

fn next<T>(queue: &Mutex<VecDeque<Result<T>>>, endpoint: &str) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(PortalError::internal(format!("no scripted {} result", endpoint))))
}

#[async_trait]
impl ClinicApi for MockClinicApi {
    async fn recommend(&self, draft: &ConsultationDraft) -> Result<RecommendationResponse> {
        self.recommend_requests.lock().unwrap().push(draft.clone());
        self.enter().await;
        next(&self.recommend_results, "recommend")
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        self.register_requests.lock().unwrap().push(request.clone());
        self.enter().await;
        next(&self.register_results, "register")
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.login_requests.lock().unwrap().push(request.clone());
        self.enter().await;
        next(&self.login_results, "login")
    }
}

/// Repository whose writes always fail.
pub struct FailingUserRepository;

#[async_trait]
impl UserSessionRepository for FailingUserRepository {
    async fn load(&self) -> Result<Option<CurrentUser>> {
        Err(PortalError::storage("disk unavailable"))
    }

    async fn save(&self, _user: &CurrentUser) -> Result<()> {
        Err(PortalError::storage("disk unavailable"))
    }

    async fn clear(&self) -> Result<()> {
        Err(PortalError::storage("disk unavailable"))
    }
}

pub fn basti_response() -> RecommendationResponse {
    RecommendationResponse {
        therapy: Some("Basti".to_string()),
        doctor_name: Some("Dr. Rao".to_string()),
        speciality: Some("Ayurveda".to_string()),
        schedule: Some("Mon 10am".to_string()),
        available_days: Some("Mon-Fri".to_string()),
        available_time: Some("9-5".to_string()),
        priority: Some("High".to_string()),
    }
}

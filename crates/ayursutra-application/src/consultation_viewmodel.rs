//! Consultation form view model.
//!
//! Owns the draft, the session store and the busy flag of the consultation
//! form, and turns a submit into one recommendation request.

use crate::busy::BusyGuard;
use crate::notice::{Notice, Notifier};
use crate::view::{ConsultationView, submit_label};
use ayursutra_core::PortalError;
use ayursutra_core::api::ClinicApi;
use ayursutra_core::consultation::{
    ConsultationDraft, ConsultationField, Priority, Recommendation, ResponsePolicy, SessionStore,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Source of recommendation timestamps, in milliseconds.
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Result of [`ConsultationViewModel::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required fields were empty. Nothing was sent.
    Rejected(Vec<ConsultationField>),
    /// Another submission is still in flight. Nothing was sent.
    AlreadyInFlight,
    /// The recommendation was stored and the draft reset.
    Completed(Recommendation),
    /// The request failed; the draft is untouched.
    Failed(PortalError),
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed(_))
    }
}

#[derive(Debug, Default)]
struct ConsultationState {
    draft: ConsultationDraft,
    store: SessionStore,
}

pub struct ConsultationViewModel {
    api: Arc<dyn ClinicApi>,
    notifier: Arc<dyn Notifier>,
    policy: ResponsePolicy,
    alert_on_failure: bool,
    clock: Clock,
    state: RwLock<ConsultationState>,
    busy: AtomicBool,
}

impl ConsultationViewModel {
    /// Lenient responses, alerts on failure, wall-clock ids.
    pub fn new(api: Arc<dyn ClinicApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            policy: ResponsePolicy::default(),
            alert_on_failure: true,
            clock: Arc::new(|| chrono::Utc::now().timestamp_millis()),
            state: RwLock::new(ConsultationState::default()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_policy(mut self, policy: ResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// When false, failures are only logged.
    pub fn with_alert_on_failure(mut self, enabled: bool) -> Self {
        self.alert_on_failure = enabled;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    /// Replaces one draft field. Only the priority is parsed.
    pub async fn set_field(&self, field: ConsultationField, value: &str) -> ayursutra_core::Result<()> {
        let mut state = self.state.write().await;
        state.draft = state.draft.with_field(field, value)?;
        Ok(())
    }

    pub async fn set_priority(&self, priority: Priority) {
        self.state.write().await.draft.priority = priority;
    }

    pub async fn draft(&self) -> ConsultationDraft {
        self.state.read().await.draft.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// False while busy or while a required field is empty.
    pub async fn can_submit(&self) -> bool {
        !self.is_busy() && self.state.read().await.draft.is_submittable()
    }

    pub fn submit_label(&self) -> &'static str {
        submit_label(self.is_busy())
    }

    /// Session entries, newest first.
    pub async fn recommendations(&self) -> Vec<Recommendation> {
        self.state.read().await.store.entries().to_vec()
    }

    pub async fn view(&self) -> ConsultationView {
        let state = self.state.read().await;
        let busy = self.is_busy();
        ConsultationView {
            draft: state.draft.clone(),
            busy,
            can_submit: !busy && state.draft.is_submittable(),
            submit_label: submit_label(busy),
            recommendations: state.store.entries().to_vec(),
        }
    }

    /// Submits the current draft.
    ///
    /// The draft is snapshotted when the call starts; edits made while the
    /// request is in flight are discarded by the reset on success.
    pub async fn submit(&self) -> SubmitOutcome {
        let draft = self.draft().await;
        if !draft.is_submittable() {
            let missing = draft.missing_fields();
            tracing::warn!(?missing, "Consultation rejected: required fields empty");
            return SubmitOutcome::Rejected(missing);
        }

        let Some(_busy) = BusyGuard::try_acquire(&self.busy) else {
            tracing::warn!("Consultation already in flight, ignoring submit");
            return SubmitOutcome::AlreadyInFlight;
        };

        tracing::info!(name = %draft.name, priority = %draft.priority, "Requesting recommendation");

        let response = match self.api.recommend(&draft).await {
            Ok(response) => response,
            Err(err) => return self.fail(err).await,
        };

        let mut state = self.state.write().await;
        let id = next_id((self.clock)(), state.store.latest_id());
        match Recommendation::from_response(&draft, &response, id, self.policy) {
            Ok(recommendation) => {
                state.store.prepend(recommendation.clone());
                state.draft = ConsultationDraft::default();
                tracing::info!(id, therapy = %recommendation.therapy, "Recommendation stored");
                SubmitOutcome::Completed(recommendation)
            }
            Err(err) => {
                drop(state);
                self.fail(err).await
            }
        }
    }

    async fn fail(&self, err: PortalError) -> SubmitOutcome {
        tracing::error!(error = %err, "Error fetching recommendations");
        if self.alert_on_failure {
            self.notifier
                .notify(Notice::alert(format!(
                    "Failed to get recommendation: {}",
                    err.user_message()
                )))
                .await;
        }
        SubmitOutcome::Failed(err)
    }
}

/// Timestamp id, bumped past the previous one when the clock has not moved.
fn next_id(now_ms: i64, previous: Option<i64>) -> i64 {
    match previous {
        Some(prev) if now_ms <= prev => prev + 1,
        _ => now_ms,
    }
}

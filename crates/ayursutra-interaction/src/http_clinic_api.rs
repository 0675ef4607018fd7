//! HttpClinicApi - REST client for the clinic backend.
//!
//! Talks to the three JSON endpoints (recommendation, registration, login)
//! with one POST each. No retries; an optional timeout comes from config.

use async_trait::async_trait;
use ayursutra_core::api::{
    ClinicApi, ErrorBody, LOGIN_PATH, LoginRequest, LoginResponse, RECOMMENDATION_PATH,
    REGISTER_PATH, RegisterRequest, RegisterResponse,
};
use ayursutra_core::config::ApiConfig;
use ayursutra_core::consultation::{ConsultationDraft, RecommendationResponse};
use ayursutra_core::{PortalError, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// [`ClinicApi`] implementation over HTTP.
#[derive(Clone)]
pub struct HttpClinicApi {
    client: Client,
    base_url: String,
}

impl HttpClinicApi {
    /// Creates a client for `base_url` (scheme + host + optional port, with
    /// or without trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Builds a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PortalError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(config.base_url.clone()),
        })
    }

    /// Overrides the underlying reqwest client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| PortalError::transport(format!("Request to {} failed: {}", url, err)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        response
            .json::<R>()
            .await
            .map_err(|err| PortalError::malformed(format!("Failed to parse response from {}: {}", url, err)))
    }
}

#[async_trait]
impl ClinicApi for HttpClinicApi {
    async fn recommend(&self, draft: &ConsultationDraft) -> Result<RecommendationResponse> {
        self.post_json(RECOMMENDATION_PATH, draft).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        self.post_json(REGISTER_PATH, request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.post_json(LOGIN_PATH, request).await
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn map_http_error(status: StatusCode, body: &str) -> PortalError {
    let fallback = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };
    PortalError::http(status.as_u16(), ErrorBody::message_from(body, &fallback))
}

//! Backend API contract.
//!
//! The backend is an opaque collaborator reached over HTTP. This module holds
//! the endpoint paths, the wire types, and the [`ClinicApi`] trait the view
//! models talk to.

use crate::auth::{AuthDraft, Role};
use crate::consultation::{ConsultationDraft, RecommendationResponse};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recommendation endpoint, relative to the base URL.
pub const RECOMMENDATION_PATH: &str = "/api/agentic-ai/";
/// Registration endpoint, relative to the base URL.
pub const REGISTER_PATH: &str = "/api/user/register/";
/// Login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "/api/user/login/";

/// Body of a registration request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password: String,
}

impl From<&AuthDraft> for RegisterRequest {
    fn from(draft: &AuthDraft) -> Self {
        Self {
            username: draft.username.clone(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            role: draft.role,
            password: draft.password.clone(),
        }
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Success body of the registration endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Body of a login request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl From<&AuthDraft> for LoginRequest {
    fn from(draft: &AuthDraft) -> Self {
        Self {
            username: draft.username.clone(),
            password: draft.password.clone(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Success body of the login endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// The signed-in user; opaque to the client.
    #[serde(default)]
    pub user: Option<Value>,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extracts a user-facing message from a raw error body.
    ///
    /// Prefers the `error` member; falls back to the trimmed body text, and to
    /// `fallback` when the body is empty.
    pub fn message_from(body: &str, fallback: &str) -> String {
        if let Ok(ErrorBody { error: Some(error) }) = serde_json::from_str::<ErrorBody>(body) {
            return error;
        }
        let trimmed = body.trim();
        if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Client-side view of the three backend endpoints.
///
/// Every method performs exactly one request: no retry, no cancellation.
/// A non-success status is reported as [`crate::PortalError::Http`] even if
/// the body could be parsed.
#[async_trait]
pub trait ClinicApi: Send + Sync {
    /// `POST /api/agentic-ai/` with the draft as JSON body.
    async fn recommend(&self, draft: &ConsultationDraft) -> Result<RecommendationResponse>;

    /// `POST /api/user/register/`.
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse>;

    /// `POST /api/user/login/`.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_from_draft() {
        let draft = AuthDraft {
            username: "asha".into(),
            first_name: "Asha".into(),
            last_name: "K".into(),
            email: "asha@example.com".into(),
            phone: "12345".into(),
            role: Role::Patient,
            password: "secret".into(),
        };
        let json = serde_json::to_value(RegisterRequest::from(&draft)).unwrap();

        assert_eq!(json["username"], "asha");
        assert_eq!(json["first_name"], "Asha");
        assert_eq!(json["role"], "patient");
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let request = LoginRequest {
            username: "asha".into(),
            password: "secret".into(),
        };
        assert!(!format!("{:?}", request).contains("secret"));
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message_from(r#"{"error":"Invalid credentials"}"#, "HTTP 401"),
            "Invalid credentials"
        );
        assert_eq!(ErrorBody::message_from("Bad Gateway", "HTTP 502"), "Bad Gateway");
        assert_eq!(ErrorBody::message_from("  ", "HTTP 500"), "HTTP 500");
    }
}

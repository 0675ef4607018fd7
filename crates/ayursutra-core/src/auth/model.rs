//! Authentication domain models.

use crate::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Account role sent with a registration request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    #[default]
    Patient,
    Doctor,
    Admin,
}

/// Which auth sub-flow the modal currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    /// Fields the renderer shows in this mode.
    pub fn visible_fields(self) -> &'static [AuthField] {
        match self {
            AuthMode::Login => &[AuthField::Username, AuthField::Password],
            AuthMode::Signup => &[
                AuthField::Username,
                AuthField::FirstName,
                AuthField::LastName,
                AuthField::Email,
                AuthField::Phone,
                AuthField::Role,
                AuthField::Password,
            ],
        }
    }
}

/// Identifies one editable field of an [`AuthDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AuthField {
    Username,
    FirstName,
    LastName,
    Email,
    Phone,
    Role,
    Password,
}

/// Draft values of the login/signup modal.
///
/// Shared by both modes; switching modes never clears it.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct AuthDraft {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password: String,
}

impl AuthDraft {
    /// Returns a copy of this draft with one field replaced.
    ///
    /// Text fields are taken verbatim; the role must name a known role.
    pub fn with_field(&self, field: AuthField, value: &str) -> Result<Self> {
        let mut next = self.clone();
        match field {
            AuthField::Username => next.username = value.to_string(),
            AuthField::FirstName => next.first_name = value.to_string(),
            AuthField::LastName => next.last_name = value.to_string(),
            AuthField::Email => next.email = value.to_string(),
            AuthField::Phone => next.phone = value.to_string(),
            AuthField::Password => next.password = value.to_string(),
            AuthField::Role => {
                next.role = Role::from_str(value.trim())
                    .map_err(|_| PortalError::validation(format!("Unknown role '{}'", value)))?;
            }
        }
        Ok(next)
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for AuthDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthDraft")
            .field("username", &self.username)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("role", &self.role)
            .field("password", &"***")
            .finish()
    }
}

/// The signed-in user as returned by the login endpoint.
///
/// The client never interprets the object beyond a few display helpers; it is
/// stored and restored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrentUser(pub Value);

impl CurrentUser {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `username` member, when the object carries one.
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str)
    }

    /// Name to greet the user with: username if present, otherwise the raw
    /// JSON.
    pub fn display_name(&self) -> String {
        self.username()
            .map(str::to_string)
            .unwrap_or_else(|| self.0.to_string())
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_toggle_round_trips() {
        assert_eq!(AuthMode::Login.toggled(), AuthMode::Signup);
        assert_eq!(AuthMode::Signup.toggled().toggled(), AuthMode::Signup);
    }

    #[test]
    fn test_login_shows_only_credentials() {
        assert_eq!(
            AuthMode::Login.visible_fields(),
            &[AuthField::Username, AuthField::Password]
        );
        assert_eq!(AuthMode::Signup.visible_fields().len(), 7);
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!(AuthField::from_str("first_name").unwrap(), AuthField::FirstName);
        assert_eq!(AuthField::from_str("EMAIL").unwrap(), AuthField::Email);
        assert!(AuthField::from_str("nickname").is_err());
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_value(Role::Doctor).unwrap(), "doctor");
        assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
        assert_eq!(Role::default(), Role::Patient);
    }

    #[test]
    fn test_with_field_sets_role() {
        let draft = AuthDraft::default()
            .with_field(AuthField::Role, "doctor")
            .unwrap()
            .with_field(AuthField::Username, "rao")
            .unwrap();
        assert_eq!(draft.role, Role::Doctor);
        assert_eq!(draft.username, "rao");
        assert!(AuthDraft::default().with_field(AuthField::Role, "nurse").is_err());
    }

    #[test]
    fn test_debug_hides_password() {
        let draft = AuthDraft {
            password: "hunter2".to_string(),
            ..Default::default()
        };
        assert!(!format!("{:?}", draft).contains("hunter2"));
    }

    #[test]
    fn test_current_user_is_transparent() {
        let user = CurrentUser::new(serde_json::json!({"id": 1, "username": "asha"}));
        assert_eq!(user.username(), Some("asha"));
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"id":1,"username":"asha"}"#
        );
    }
}

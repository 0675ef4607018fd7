use crate::consultation::ResponsePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_USER_KEY: &str = "ayursutra.currentUser";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PortalConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub features: FeatureConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            features: FeatureConfig::default(),
            storage: StorageConfig::default(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Absent means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Optional capabilities of the portal.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FeatureConfig {
    #[serde(default = "default_true")]
    pub auth_enabled: bool,
    /// Fail a submission whose response lacks a field instead of filling
    /// the gap with a fallback literal.
    #[serde(default)]
    pub strict_responses: bool,
    /// Raise a user-visible alert when a consultation fails, not only a log
    /// line.
    #[serde(default = "default_true")]
    pub alert_on_failure: bool,
}

impl FeatureConfig {
    pub fn response_policy(&self) -> ResponsePolicy {
        if self.strict_responses {
            ResponsePolicy::Strict
        } else {
            ResponsePolicy::Lenient
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            auth_enabled: true,
            strict_responses: false,
            alert_on_failure: true,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Overrides the default key-value file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default = "default_user_key")]
    pub user_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            user_key: default_user_key(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_key() -> String {
    DEFAULT_USER_KEY.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, None);
        assert!(config.features.auth_enabled);
        assert!(config.features.alert_on_failure);
        assert_eq!(config.features.response_policy(), ResponsePolicy::Lenient);
        assert_eq!(config.storage.user_key, DEFAULT_USER_KEY);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config: PortalConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://clinic.example"

            [features]
            auth_enabled = false
            strict_responses = true
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://clinic.example");
        assert!(!config.features.auth_enabled);
        assert!(config.features.alert_on_failure);
        assert_eq!(config.features.response_policy(), ResponsePolicy::Strict);
    }
}

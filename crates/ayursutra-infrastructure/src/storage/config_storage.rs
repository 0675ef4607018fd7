//! Config file storage.
//!
//! Loads and saves `PortalConfig` as TOML, and layers environment overrides
//! on top of the file.

use super::atomic::{read_non_empty, write_atomic};
use ayursutra_core::PortalError;
use ayursutra_core::config::PortalConfig;
use std::path::{Path, PathBuf};

/// Overrides `api.base_url`.
pub const ENV_BASE_URL: &str = "AYURSUTRA_API_BASE_URL";
/// Overrides `log_level`.
pub const ENV_LOG_LEVEL: &str = "AYURSUTRA_LOG_LEVEL";

/// Errors that can occur during config storage operations.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigStorageError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

impl From<toml::ser::Error> for ConfigStorageError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigStorageError::TomlSerError(e)
    }
}

impl From<ConfigStorageError> for PortalError {
    fn from(e: ConfigStorageError) -> Self {
        PortalError::config(e.to_string())
    }
}

/// Storage for `config.toml`.
///
/// Responsibilities:
/// - Parse TOML into `PortalConfig`, defaulting every missing section
/// - Write the config back atomically
///
/// Does NOT:
/// - Resolve the default path (see `AyurPaths`)
/// - Validate the base URL (the HTTP client does)
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config. A missing or blank file yields the defaults.
    pub fn load(&self) -> Result<PortalConfig, ConfigStorageError> {
        match read_non_empty(&self.path)? {
            Some(content) => Ok(toml::from_str(&content)?),
            None => Ok(PortalConfig::default()),
        }
    }

    /// Loads the config and applies process environment overrides.
    pub fn load_with_env(&self) -> Result<PortalConfig, ConfigStorageError> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// Saves the config atomically.
    pub fn save(&self, config: &PortalConfig) -> Result<(), ConfigStorageError> {
        let content = toml::to_string_pretty(config)?;
        write_atomic(&self.path, content.as_bytes())?;
        Ok(())
    }

    /// Writes the default config if no file exists yet.
    ///
    /// Returns `true` when a file was created.
    pub fn ensure_exists(&self) -> Result<bool, ConfigStorageError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&PortalConfig::default())?;
        Ok(true)
    }
}

/// Applies environment overrides using `lookup` to read variables.
///
/// Blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut PortalConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(base_url) = non_blank(ENV_BASE_URL) {
        config.api.base_url = base_url;
    }
    if let Some(level) = non_blank(ENV_LOG_LEVEL) {
        config.log_level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("config.toml"));

        assert_eq!(storage.load().unwrap(), PortalConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("config.toml"));

        let mut config = PortalConfig::default();
        config.api.base_url = "https://clinic.example".to_string();
        config.api.timeout_secs = Some(30);
        config.features.strict_responses = true;
        storage.save(&config).unwrap();

        assert_eq!(storage.load().unwrap(), config);
    }

    #[test]
    fn test_ensure_exists_only_creates_once() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp_dir.path().join("ayursutra").join("config.toml"));

        assert!(storage.ensure_exists().unwrap());
        assert!(!storage.ensure_exists().unwrap());
        assert!(storage.path().exists());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let result = ConfigStorage::new(path).load();
        assert!(matches!(result, Err(ConfigStorageError::TomlParseError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "http://10.0.0.5:9000"),
            (ENV_LOG_LEVEL, " "),
        ]
        .into_iter()
        .collect();

        let mut config = PortalConfig::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.log_level, "info");
    }
}

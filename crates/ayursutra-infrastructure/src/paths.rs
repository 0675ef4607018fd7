//! Unified path management for ayursutra files.
//!
//! ```text
//! ~/.config/ayursutra/             # Config directory
//! └── config.toml                  # Portal configuration
//!
//! ~/.local/share/ayursutra/        # Data directory
//! └── local_storage.json           # Key-value store (persisted user)
//! ```

use ayursutra_core::PortalError;
use ayursutra_core::config::StorageConfig;
use std::path::PathBuf;

const APP_NAME: &str = "ayursutra";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither the platform config nor data directory could be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for PortalError {
    fn from(e: PathError) -> Self {
        PortalError::config(e.to_string())
    }
}

/// Resolves platform directories (XDG on Linux, the native locations
/// elsewhere) via the `dirs` crate.
pub struct AyurPaths;

impl AyurPaths {
    /// Returns the config directory (e.g. `~/.config/ayursutra/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/ayursutra/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default key-value store path.
    pub fn local_storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("local_storage.json"))
    }

    /// Key-value store path honoring the `[storage] path` override.
    pub fn local_storage_for(config: &StorageConfig) -> Result<PathBuf, PathError> {
        match &config.path {
            Some(path) => Ok(path.clone()),
            None => Self::local_storage_file(),
        }
    }
}

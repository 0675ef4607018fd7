//! Storage layer for atomic file operations.

mod atomic;
mod config_storage;
mod local_storage;

pub use config_storage::{
    ConfigStorage, ConfigStorageError, ENV_BASE_URL, ENV_LOG_LEVEL, apply_env_overrides,
};
pub use local_storage::{LocalStorage, LocalStorageError};

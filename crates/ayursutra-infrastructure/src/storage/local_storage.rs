//! File-backed key-value store with browser `localStorage` semantics.
//!
//! The whole store is one JSON object mapping keys to string values. Typed
//! values are stored as JSON-serialized strings, exactly as a web client would
//! put them into `localStorage`.

use super::atomic::{FileLock, read_non_empty, write_atomic};
use ayursutra_core::PortalError;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Errors that can occur during key-value storage operations.
#[derive(Debug)]
pub enum LocalStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// The store file or a stored value is not valid JSON.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for LocalStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            LocalStorageError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for LocalStorageError {}

impl From<std::io::Error> for LocalStorageError {
    fn from(e: std::io::Error) -> Self {
        LocalStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for LocalStorageError {
    fn from(e: serde_json::Error) -> Self {
        LocalStorageError::JsonError(e)
    }
}

impl From<LocalStorageError> for PortalError {
    fn from(e: LocalStorageError) -> Self {
        PortalError::storage(e.to_string())
    }
}

type Entries = BTreeMap<String, String>;

/// A handle to a key-value JSON file.
///
/// Each mutating call is a locked read-modify-write, so concurrent processes
/// sharing the file never lose unrelated keys; for the same key the last
/// writer wins.
///
/// Reads of a file that is not a JSON object fail. A write to such a file
/// moves the old content to `<file>.corrupt` and starts from an empty store.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the raw string stored under `key`.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, LocalStorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: &str, value: &str) -> Result<(), LocalStorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    /// Removes `key`. Removing a missing key is not an error.
    pub fn remove_item(&self, key: &str) -> Result<(), LocalStorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    /// All keys currently stored, sorted.
    pub fn keys(&self) -> Result<Vec<String>, LocalStorageError> {
        Ok(self.read_entries()?.into_keys().collect())
    }

    /// Deserializes the JSON string stored under `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, LocalStorageError> {
        match self.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializes `value` to JSON and stores it under `key`.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), LocalStorageError> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }

    fn read_entries(&self) -> Result<Entries, LocalStorageError> {
        match read_non_empty(&self.path)? {
            Some(content) => Ok(serde_json::from_str(&content)?),
            None => Ok(Entries::new()),
        }
    }

    /// Backup location for content that could not be parsed.
    pub fn corrupt_backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }

    /// Like `read_entries`, but unparseable content is set aside instead of
    /// blocking every later write. Caller holds the lock.
    fn entries_for_write(&self) -> Result<Entries, LocalStorageError> {
        let Some(content) = read_non_empty(&self.path)? else {
            return Ok(Entries::new());
        };
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let backup = self.corrupt_backup_path();
                tracing::warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "Local storage is not valid JSON, starting fresh"
                );
                write_atomic(&backup, content.as_bytes())?;
                Ok(Entries::new())
            }
        }
    }

    fn update<F>(&self, f: F) -> Result<(), LocalStorageError>
    where
        F: FnOnce(&mut Entries),
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut entries = self.entries_for_write()?;
        f(&mut entries);
        let content = serde_json::to_string_pretty(&entries)?;
        write_atomic(&self.path, content.as_bytes())?;
        Ok(())
    }
}

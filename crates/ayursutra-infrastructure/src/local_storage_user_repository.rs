//! `UserSessionRepository` backed by the key-value file.

use crate::storage::LocalStorage;
use async_trait::async_trait;
use ayursutra_core::auth::{CurrentUser, UserSessionRepository};
use ayursutra_core::config::DEFAULT_USER_KEY;
use ayursutra_core::{PortalError, Result};

/// Persists the signed-in user as a JSON string under a fixed key.
///
/// File access runs on the blocking pool so the async caller never stalls
/// the runtime.
#[derive(Debug, Clone)]
pub struct LocalStorageUserRepository {
    storage: LocalStorage,
    key: String,
}

impl LocalStorageUserRepository {
    pub fn new(storage: LocalStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Uses the default key (`ayursutra.currentUser`).
    pub fn with_default_key(storage: LocalStorage) -> Self {
        Self::new(storage, DEFAULT_USER_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(LocalStorage, String) -> Result<T> + Send + 'static,
    {
        let storage = self.storage.clone();
        let key = self.key.clone();
        tokio::task::spawn_blocking(move || f(storage, key))
            .await
            .map_err(|e| PortalError::internal(format!("storage task failed: {}", e)))?
    }
}

#[async_trait]
impl UserSessionRepository for LocalStorageUserRepository {
    async fn load(&self) -> Result<Option<CurrentUser>> {
        self.run(|storage, key| {
            let user = storage.get_json::<CurrentUser>(&key)?;
            tracing::debug!(key = %key, found = user.is_some(), "Loaded persisted user");
            Ok(user)
        })
        .await
    }

    async fn save(&self, user: &CurrentUser) -> Result<()> {
        let user = user.clone();
        self.run(move |storage, key| {
            storage.set_json(&key, &user)?;
            tracing::debug!(key = %key, "Persisted user");
            Ok(())
        })
        .await
    }

    async fn clear(&self) -> Result<()> {
        self.run(|storage, key| {
            storage.remove_item(&key)?;
            tracing::debug!(key = %key, "Cleared persisted user");
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn repository(temp_dir: &TempDir) -> LocalStorageUserRepository {
        let storage = LocalStorage::new(temp_dir.path().join("local_storage.json"));
        LocalStorageUserRepository::with_default_key(storage)
    }

    #[tokio::test]
    async fn test_load_without_entry() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(repository(&temp_dir).load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);
        let user = CurrentUser::new(json!({"id": 1, "username": "asha"}));

        repo.save(&user).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(user));

        repo.clear().await.unwrap();
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entry_is_serialized_user_under_fixed_key() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);
        repo.save(&CurrentUser::new(json!({"id": 1, "username": "asha"})))
            .await
            .unwrap();

        let raw = LocalStorage::new(temp_dir.path().join("local_storage.json"))
            .get_item("ayursutra.currentUser")
            .unwrap();
        assert_eq!(raw.as_deref(), Some(r#"{"id":1,"username":"asha"}"#));
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("local_storage.json"));
        storage.set_item("ayursutra.currentUser", "{oops").unwrap();

        let err = LocalStorageUserRepository::with_default_key(storage)
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Storage(_)));
    }
}

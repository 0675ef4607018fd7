//! Process-local `UserSessionRepository`.

use async_trait::async_trait;
use ayursutra_core::Result;
use ayursutra_core::auth::{CurrentUser, UserSessionRepository};
use tokio::sync::RwLock;

/// Keeps the persisted user in memory only.
///
/// Used when no storage file is wanted (ephemeral runs) and as a test double.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    user: RwLock<Option<CurrentUser>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `user` already persisted.
    pub fn with_user(user: CurrentUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    /// Current content, for assertions.
    pub async fn snapshot(&self) -> Option<CurrentUser> {
        self.user.read().await.clone()
    }
}

#[async_trait]
impl UserSessionRepository for InMemoryUserRepository {
    async fn load(&self) -> Result<Option<CurrentUser>> {
        Ok(self.user.read().await.clone())
    }

    async fn save(&self, user: &CurrentUser) -> Result<()> {
        *self.user.write().await = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.user.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_round_trip() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(repo.load().await.unwrap(), None);

        let user = CurrentUser::new(json!({"id": 7}));
        repo.save(&user).await.unwrap();
        assert_eq!(repo.snapshot().await, Some(user));

        repo.clear().await.unwrap();
        assert_eq!(repo.load().await.unwrap(), None);
    }
}

//! User session repository trait.
//!
//! Defines the interface for persisting the signed-in user across restarts.

use super::model::CurrentUser;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the persisted current user.
///
/// This trait decouples the auth view model from the storage mechanism
/// (a JSON key-value file, an in-memory map in tests, ...). At most one user
/// is stored.
///
/// # Implementation Notes
///
/// The backing store may be shared with other processes; implementations
/// need not resolve conflicts (last writer wins).
#[async_trait]
pub trait UserSessionRepository: Send + Sync {
    /// Loads the persisted user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user))`: A user was persisted
    /// - `Ok(None)`: Nothing persisted
    /// - `Err(_)`: Storage could not be read or the entry is corrupt
    async fn load(&self) -> Result<Option<CurrentUser>>;

    /// Persists the user, replacing any previous entry.
    async fn save(&self, user: &CurrentUser) -> Result<()>;

    /// Removes the persisted user. Succeeds when nothing was stored.
    async fn clear(&self) -> Result<()>;
}

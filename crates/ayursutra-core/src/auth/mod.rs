//! Authentication domain module.
//!
//! # Module Structure
//!
//! - `model`: Auth draft, modes, roles and the signed-in user
//! - `repository`: Repository trait for persisting the signed-in user

mod model;
mod repository;

// Re-export public API
pub use model::{AuthDraft, AuthField, AuthMode, CurrentUser, Role};
pub use repository::UserSessionRepository;

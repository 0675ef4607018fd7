//! Domain layer for the AyurSutra consultation portal.
//!
//! Holds the models, the error type and the traits (`ClinicApi`,
//! `UserSessionRepository`) that the infrastructure and interaction crates
//! implement and the application crate consumes.

pub mod api;
pub mod auth;
pub mod config;
pub mod consultation;
pub mod error;

// Re-export common error type
pub use error::{PortalError, Result};

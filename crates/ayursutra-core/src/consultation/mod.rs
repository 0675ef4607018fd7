//! Consultation domain module.
//!
//! # Module Structure
//!
//! - `model`: Draft request and priority (`ConsultationDraft`, `Priority`)
//! - `recommendation`: Completed result and response mapping (`Recommendation`)
//! - `store`: Append-only session list (`SessionStore`)
//!
//! # Usage
//!
//! ```ignore
//! use ayursutra_core::consultation::{ConsultationDraft, Recommendation, SessionStore};
//! ```

mod model;
mod recommendation;
mod store;

// Re-export public API
pub use model::{ConsultationDraft, ConsultationField, Priority};
pub use recommendation::{
    FALLBACK_DOCTOR, FALLBACK_SCHEDULE, FALLBACK_THERAPY, Recommendation, RecommendationResponse,
    ResponsePolicy,
};
pub use store::{EMPTY_STATE_HINT, EMPTY_STATE_TITLE, SessionStore};

//! Application layer for AyurSutra.
//!
//! View models for the consultation form and the login/signup modal, the
//! notice log they report to, and the `Portal` facade that wires them from
//! configuration. Renderers only read view snapshots and call operations.

pub mod auth_viewmodel;
mod busy;
pub mod consultation_viewmodel;
pub mod notice;
pub mod portal;
pub mod view;

pub use auth_viewmodel::{AuthOutcome, AuthViewModel};
pub use consultation_viewmodel::{ConsultationViewModel, SubmitOutcome};
pub use notice::{Notice, NoticeKind, NoticeLog, Notifier};
pub use portal::Portal;
pub use view::{AuthView, ConsultationView};

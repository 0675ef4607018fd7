//! Read-only snapshots handed to renderers.

use ayursutra_core::auth::{AuthDraft, AuthField, AuthMode, CurrentUser};
use ayursutra_core::consultation::{
    ConsultationDraft, EMPTY_STATE_HINT, EMPTY_STATE_TITLE, Recommendation,
};

/// Label of the idle submit control.
pub const SUBMIT_LABEL: &str = "Get AI-Powered Recommendation";
/// Label of the submit control while a request is in flight.
pub const SUBMITTING_LABEL: &str = "Analyzing...";

pub fn submit_label(busy: bool) -> &'static str {
    if busy { SUBMITTING_LABEL } else { SUBMIT_LABEL }
}

/// Everything the consultation panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationView {
    pub draft: ConsultationDraft,
    pub busy: bool,
    pub can_submit: bool,
    pub submit_label: &'static str,
    /// Newest first.
    pub recommendations: Vec<Recommendation>,
}

impl ConsultationView {
    /// `(title, hint)` when there is nothing to list.
    pub fn empty_state(&self) -> Option<(&'static str, &'static str)> {
        self.recommendations
            .is_empty()
            .then_some((EMPTY_STATE_TITLE, EMPTY_STATE_HINT))
    }
}

/// Everything the auth modal and header show.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthView {
    pub mode: AuthMode,
    pub modal_open: bool,
    pub busy: bool,
    pub fields: &'static [AuthField],
    pub draft: AuthDraft,
    pub current_user: Option<CurrentUser>,
}

impl AuthView {
    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }
}

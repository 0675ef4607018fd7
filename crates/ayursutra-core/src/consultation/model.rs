//! Consultation draft domain model.

use crate::error::{PortalError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Urgency the patient attaches to a consultation request.
///
/// Serialized with its capitalized name (`"High"`, `"Medium"`, `"Low"`),
/// which is what the recommendation endpoint expects.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Human-readable option label shown next to the priority selector.
    pub fn option_label(&self) -> &'static str {
        match self {
            Priority::High => "High - Emergency (Heart, severe issue)",
            Priority::Medium => "Medium - Moderate concern",
            Priority::Low => "Low - Mild issue",
        }
    }
}

/// Identifies one editable field of a [`ConsultationDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConsultationField {
    Name,
    Problem,
    Priority,
}

/// The not-yet-submitted consultation request.
///
/// This is also the request body of the recommendation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsultationDraft {
    pub name: String,
    pub problem: String,
    pub priority: Priority,
}

impl ConsultationDraft {
    /// Returns a copy of this draft with one field replaced.
    ///
    /// Name and problem are taken verbatim. The priority field must name a
    /// known priority (case-insensitive); anything else is a validation error
    /// and leaves no new draft behind.
    pub fn with_field(&self, field: ConsultationField, value: &str) -> Result<Self> {
        let mut next = self.clone();
        match field {
            ConsultationField::Name => next.name = value.to_string(),
            ConsultationField::Problem => next.problem = value.to_string(),
            ConsultationField::Priority => {
                next.priority = Priority::from_str(value.trim()).map_err(|_| {
                    PortalError::validation(format!("Unknown priority '{}'", value))
                })?;
            }
        }
        Ok(next)
    }

    /// Whether the draft passes the submission guard.
    ///
    /// Name and problem must both be non-empty; priority always has a value.
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.problem.is_empty()
    }

    /// Names of the required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<ConsultationField> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(ConsultationField::Name);
        }
        if self.problem.is_empty() {
            missing.push(ConsultationField::Problem);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft_is_empty_medium() {
        let draft = ConsultationDraft::default();
        assert_eq!(draft.name, "");
        assert_eq!(draft.problem, "");
        assert_eq!(draft.priority, Priority::Medium);
        assert!(!draft.is_submittable());
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let draft = ConsultationDraft::default();
        let next = draft.with_field(ConsultationField::Name, "Asha").unwrap();

        assert_eq!(next.name, "Asha");
        assert_eq!(draft.name, "");
    }

    #[test]
    fn test_with_field_does_not_validate_text() {
        let draft = ConsultationDraft::default()
            .with_field(ConsultationField::Problem, "   ")
            .unwrap();
        assert_eq!(draft.problem, "   ");
    }

    #[test]
    fn test_priority_parsing_is_case_insensitive() {
        let draft = ConsultationDraft::default()
            .with_field(ConsultationField::Priority, "high")
            .unwrap();
        assert_eq!(draft.priority, Priority::High);
    }

    #[test]
    fn test_unknown_priority_is_rejected() {
        let result = ConsultationDraft::default().with_field(ConsultationField::Priority, "urgent");
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_missing_fields() {
        let draft = ConsultationDraft::default()
            .with_field(ConsultationField::Name, "Asha")
            .unwrap();
        assert_eq!(draft.missing_fields(), vec![ConsultationField::Problem]);
        assert!(!draft.is_submittable());
    }

    #[test]
    fn test_priority_wire_format() {
        let draft = ConsultationDraft {
            name: "Asha".into(),
            problem: "lower back pain".into(),
            priority: Priority::High,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["priority"], "High");
    }
}

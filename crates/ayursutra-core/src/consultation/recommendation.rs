//! Recommendation model and the mapping from the raw endpoint response.

use super::model::{ConsultationDraft, Priority};
use crate::error::{PortalError, Result};
use serde::{Deserialize, Serialize};

/// Fallback therapy text used by [`ResponsePolicy::Lenient`].
pub const FALLBACK_THERAPY: &str = "Suggested by AI";
/// Fallback doctor label used by [`ResponsePolicy::Lenient`].
pub const FALLBACK_DOCTOR: &str = "Not Assigned";
/// Fallback schedule label used by [`ResponsePolicy::Lenient`].
pub const FALLBACK_SCHEDULE: &str = "Pending";

/// Raw success body of the recommendation endpoint.
///
/// Every field is optional on the wire; [`Recommendation::from_response`]
/// decides what a missing field means.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub therapy: Option<String>,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub speciality: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub available_days: Option<String>,
    #[serde(default)]
    pub available_time: Option<String>,
    /// Echo of the submitted priority. Accepted but not trusted.
    #[serde(default)]
    pub priority: Option<String>,
}

/// How to treat a success body with missing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePolicy {
    /// Every consumed field is required; a gap is a malformed response.
    Strict,
    /// Gaps are filled with fixed fallback literals.
    #[default]
    Lenient,
}

/// One completed consultation, as shown in the recommendations list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Creation timestamp in milliseconds, unique within a session.
    pub id: i64,
    pub name: String,
    pub problem: String,
    pub therapy: String,
    /// `"<doctor_name> (<speciality>)"`
    pub doctor_label: String,
    /// `"<schedule> | Available: <available_days> <available_time>"`
    pub schedule_label: String,
    pub priority: Priority,
}

impl Recommendation {
    /// Builds a recommendation from the submitted draft and the endpoint's
    /// success body.
    ///
    /// Name, problem and priority come from the draft, never from the
    /// response. This function is pure: `id` is supplied by the caller.
    pub fn from_response(
        draft: &ConsultationDraft,
        response: &RecommendationResponse,
        id: i64,
        policy: ResponsePolicy,
    ) -> Result<Self> {
        let (therapy, doctor_label, schedule_label) = match policy {
            ResponsePolicy::Strict => strict_labels(response)?,
            ResponsePolicy::Lenient => lenient_labels(response),
        };

        Ok(Self {
            id,
            name: draft.name.clone(),
            problem: draft.problem.clone(),
            therapy,
            doctor_label,
            schedule_label,
            priority: draft.priority,
        })
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| PortalError::malformed(format!("missing field '{}'", field)))
}

fn strict_labels(response: &RecommendationResponse) -> Result<(String, String, String)> {
    let therapy = required(&response.therapy, "therapy")?;
    let doctor = required(&response.doctor_name, "doctor_name")?;
    let speciality = required(&response.speciality, "speciality")?;
    let schedule = required(&response.schedule, "schedule")?;
    let days = required(&response.available_days, "available_days")?;
    let time = required(&response.available_time, "available_time")?;

    Ok((
        therapy.to_string(),
        doctor_label(doctor, speciality),
        schedule_label(schedule, days, time),
    ))
}

fn lenient_labels(response: &RecommendationResponse) -> (String, String, String) {
    let therapy = response
        .therapy
        .clone()
        .unwrap_or_else(|| FALLBACK_THERAPY.to_string());

    let doctor = match (&response.doctor_name, &response.speciality) {
        (Some(name), Some(speciality)) => doctor_label(name, speciality),
        (Some(name), None) => name.clone(),
        (None, _) => FALLBACK_DOCTOR.to_string(),
    };

    let schedule = match &response.schedule {
        Some(schedule) => {
            let days = response.available_days.as_deref().unwrap_or_default();
            let time = response.available_time.as_deref().unwrap_or_default();
            schedule_label(schedule, days, time).trim_end().to_string()
        }
        None => FALLBACK_SCHEDULE.to_string(),
    };

    (therapy, doctor, schedule)
}

fn doctor_label(name: &str, speciality: &str) -> String {
    format!("{} ({})", name, speciality)
}

fn schedule_label(schedule: &str, days: &str, time: &str) -> String {
    format!("{} | Available: {} {}", schedule, days, time)
}

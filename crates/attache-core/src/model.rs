//! Records exchanged with the remote API.
//!
//! The API is loose about types: ids arrive as numbers on one endpoint and
//! strings on another, and optional fields are sometimes absent, sometimes
//! `null`. Everything here decodes leniently and keeps the wire names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::reference::ReferenceOption;

// ─── Lenient decoding ────────────────────────────────────────────────────────

/// Accept a JSON string or number (or `null`) and keep it as a string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Value::deserialize(deserializer)?;
  Ok(match value {
    Value::String(s) => s,
    Value::Null => String::new(),
    other => other.to_string(),
  })
}

/// Whether the JSON value `v` names `id`, either directly or as a nested
/// `{ "student_id": .. }` object.
fn names_student(v: &Value, id: &str) -> bool {
  match v {
    Value::String(s) => s == id,
    Value::Number(n) => n.to_string() == id,
    Value::Object(obj) => obj.get("student_id").is_some_and(|inner| names_student(inner, id)),
    _ => false,
  }
}

// ─── Students ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  #[serde(deserialize_with = "string_or_number")]
  pub student_id:             String,
  #[serde(default)]
  pub first_name:             String,
  #[serde(default)]
  pub last_name:              String,
  #[serde(default, deserialize_with = "string_or_number")]
  pub year_of_study:          String,
  #[serde(default)]
  pub student_email:          String,
  #[serde(default)]
  pub student_contact_number: String,
}

impl Student {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name).trim().to_owned()
  }
}

/// A student's placement preference.
///
/// `preferred_industry` and `desired_skill` are kept as raw JSON because the
/// API returns either a scalar id or a list of ids depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentPreference {
  #[serde(alias = "id", deserialize_with = "string_or_number")]
  pub student_pref_id:    String,
  #[serde(default)]
  pub student:            Value,
  #[serde(default)]
  pub student_id:         Value,
  #[serde(default)]
  pub student_name:       Option<String>,
  #[serde(default)]
  pub pref_location:      String,
  #[serde(default)]
  pub available_from:     String,
  #[serde(default)]
  pub available_to:       String,
  #[serde(default)]
  pub preferred_industry: Value,
  #[serde(default)]
  pub desired_skill:      Value,
  #[serde(default)]
  pub industries_details: Vec<ReferenceOption>,
  #[serde(default)]
  pub skills_details:     Vec<ReferenceOption>,
}

impl StudentPreference {
  /// Whether this preference was submitted by `student_id`. The owner may be
  /// in `student`, `student_id` or `student.student_id`.
  pub fn belongs_to(&self, student_id: &str) -> bool {
    names_student(&self.student, student_id) || names_student(&self.student_id, student_id)
  }

  pub fn label(&self) -> &str {
    self.student_name.as_deref().unwrap_or(&self.student_pref_id)
  }
}

// ─── Organisations ───────────────────────────────────────────────────────────

/// The denormalised preference summary embedded in admin organisation rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSummary {
  #[serde(default)]
  pub required_skills_names:  Vec<String>,
  #[serde(default)]
  pub preferred_fields_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
  pub org_id:                  i64,
  #[serde(default)]
  pub org_name:                String,
  #[serde(default, deserialize_with = "string_or_number")]
  pub industry:                String,
  #[serde(default)]
  pub industry_name:           Option<String>,
  #[serde(default)]
  pub town:                    String,
  #[serde(default)]
  pub street:                  String,
  #[serde(default, deserialize_with = "string_or_number")]
  pub plot_number:             String,
  #[serde(default, deserialize_with = "string_or_number")]
  pub contact_number:          String,
  #[serde(default)]
  pub contact_email:           String,
  #[serde(default)]
  pub organisation_preference: Option<PreferenceSummary>,
}

/// An organisation's placement offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganisationPreference {
  #[serde(alias = "id")]
  pub pref_id:              i64,
  #[serde(default, deserialize_with = "string_or_number")]
  pub pref_education_level: String,
  #[serde(default, deserialize_with = "string_or_number")]
  pub positions_available:  String,
  #[serde(default)]
  pub start_date:           String,
  #[serde(default)]
  pub end_date:             String,
  #[serde(default)]
  pub preferred_fields:     Value,
  #[serde(default)]
  pub required_skills:      Value,
}

// ─── Logbooks ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogbookStatus {
  #[default]
  Pending,
  Viewed,
}

impl LogbookStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      LogbookStatus::Pending => "pending",
      LogbookStatus::Viewed => "viewed",
    }
  }
}

/// One weekly logbook entry as an organisation sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogbookRecord {
  #[serde(deserialize_with = "string_or_number")]
  pub logbook_id:   String,
  #[serde(default, deserialize_with = "string_or_number")]
  pub student_id:   String,
  #[serde(default)]
  pub student_name: Option<String>,
  #[serde(default)]
  pub org_id:       Option<i64>,
  #[serde(default, deserialize_with = "string_or_number")]
  pub week_number:  String,
  #[serde(default)]
  pub log_entry:    String,
  #[serde(default)]
  pub submitted_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub status:       LogbookStatus,
  #[serde(default)]
  pub viewed_at:    Option<DateTime<Utc>>,
}

impl LogbookRecord {
  /// Apply an acknowledged mark-viewed locally.
  pub fn mark_viewed(&mut self, at: DateTime<Utc>) {
    self.status = LogbookStatus::Viewed;
    self.viewed_at = Some(at);
  }
}

/// Body of `POST /logbook/`, sent once the organisation name has resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogbookSubmission {
  pub student_id:  String,
  pub org_id:      i64,
  pub week_number: String,
  pub log_entry:   String,
}

// ─── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrganisationLoginResponse {
  #[serde(deserialize_with = "string_or_number")]
  pub organisation_id: String,
  #[serde(default)]
  pub org_name:        Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupervisorUser {
  #[serde(deserialize_with = "string_or_number")]
  pub id:    String,
  pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupervisorLoginResponse {
  pub token: String,
  pub user:  SupervisorUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminLoginResponse {
  #[serde(default)]
  pub message:  Option<String>,
  #[serde(deserialize_with = "string_or_number")]
  pub admin_id: String,
  pub email:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrgIdLookup {
  pub org_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchResponse {
  #[serde(default)]
  pub message:  Option<String>,
  #[serde(default)]
  pub match_id: Option<Value>,
}

/// Any success body that may carry a human-readable `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
  #[serde(default)]
  pub message: Option<String>,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn preference_owner_is_found_in_any_of_three_places() {
    let flat: StudentPreference = serde_json::from_value(json!({
      "student_pref_id": 4, "student": "202100123"
    }))
    .unwrap();
    let by_id: StudentPreference = serde_json::from_value(json!({
      "id": 5, "student_id": 202100123
    }))
    .unwrap();
    let nested: StudentPreference = serde_json::from_value(json!({
      "student_pref_id": "6", "student": { "student_id": "202100123" }
    }))
    .unwrap();

    assert_eq!(by_id.student_pref_id, "5");
    for pref in [&flat, &by_id, &nested] {
      assert!(pref.belongs_to("202100123"));
      assert!(!pref.belongs_to("202100999"));
    }
  }

  #[test]
  fn logbook_record_decodes_and_marks_viewed() {
    let mut record: LogbookRecord = serde_json::from_value(json!({
      "logbook_id": "A1B2C3D4",
      "student_id": "202100123",
      "student_name": "Neo Kgosi",
      "org_id": 3,
      "week_number": 2,
      "log_entry": "Wired the sensor rig.",
      "submitted_at": "2030-02-03T10:00:00Z",
      "status": "pending",
      "viewed_at": null
    }))
    .unwrap();
    assert_eq!(record.week_number, "2");
    assert_eq!(record.status, LogbookStatus::Pending);

    let now = Utc::now();
    record.mark_viewed(now);
    assert_eq!(record.status, LogbookStatus::Viewed);
    assert_eq!(record.viewed_at, Some(now));
  }

  #[test]
  fn organisation_row_tolerates_missing_preference() {
    let org: Organisation = serde_json::from_value(json!({
      "org_id": 9, "org_name": "Debswana", "industry": 2, "plot_number": 114
    }))
    .unwrap();
    assert_eq!(org.industry, "2");
    assert_eq!(org.plot_number, "114");
    assert!(org.organisation_preference.is_none());
  }
}

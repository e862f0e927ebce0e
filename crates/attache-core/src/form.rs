//! Form state: drafts, field error maps, and the controller that ties them
//! to a declarative [`FormSpec`].
//!
//! The remote API reports validation failures as a field-keyed object. The
//! one function that turns such a payload into per-field messages is
//! [`map_error_payload`]; the only per-screen variation is its [`CatchAll`]
//! configuration, which says where errors not tied to a field end up.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{
  Error, Result,
  forms::{FieldKind, FormSpec, Requirement},
};

/// Keys the API uses for errors that belong to no particular field.
pub const NON_FIELD_KEYS: [&str; 2] = ["__all__", "non_field_errors"];

/// Message put on a required field left blank.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

// ─── Draft ───────────────────────────────────────────────────────────────────

/// The in-progress values of a form: field name → string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
  values: BTreeMap<String, String>,
}

impl FormDraft {
  /// A draft with every field of `spec` present and blank.
  pub fn blank(spec: &FormSpec) -> Self {
    let values = spec
      .fields
      .iter()
      .map(|f| (f.name.to_owned(), String::new()))
      .collect();
    Self { values }
  }

  pub fn get(&self, name: &str) -> &str {
    self.values.get(name).map(String::as_str).unwrap_or_default()
  }

  pub fn set(&mut self, name: &str, value: impl Into<String>) {
    self.values.insert(name.to_owned(), value.into());
  }

  pub fn contains(&self, name: &str) -> bool { self.values.contains_key(name) }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// Copy matching fields out of a fetched JSON record. Numbers and booleans
  /// are stringified, `null` becomes blank, keys the draft does not know are
  /// ignored.
  pub fn prefill(&mut self, record: &Value) {
    let Some(obj) = record.as_object() else {
      return;
    };
    for (name, slot) in self.values.iter_mut() {
      if let Some(v) = obj.get(name) {
        *slot = value_to_string(v);
      }
    }
  }

  /// The draft as a JSON object of strings, without the `skip` fields.
  pub fn to_json_without(&self, skip: &[&str]) -> Value {
    let map: Map<String, Value> = self
      .values
      .iter()
      .filter(|(k, _)| !skip.contains(&k.as_str()))
      .map(|(k, v)| (k.clone(), Value::String(v.clone())))
      .collect();
    Value::Object(map)
  }

  pub fn to_json(&self) -> Value { self.to_json_without(&[]) }
}

fn value_to_string(v: &Value) -> String {
  match v {
    Value::Null => String::new(),
    Value::String(s) => s.clone(),
    Value::Array(items) => items.first().map(value_to_string).unwrap_or_default(),
    other => other.to_string(),
  }
}

// ─── Field errors ────────────────────────────────────────────────────────────

/// Per-field inline messages. Replaced wholesale after every submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.0.get(field).map(String::as_str)
  }

  pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.insert(field.into(), message.into());
  }

  pub fn remove(&mut self, field: &str) { self.0.remove(field); }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn fields(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }
}

// ─── Error payloads ──────────────────────────────────────────────────────────

/// The decoded body of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPayload {
  /// Nothing usable in the body.
  Empty,
  /// A flat message under `error`, `message` or `detail`.
  Message(String),
  /// A field-keyed object; list values are unwrapped to their first element.
  Fields(BTreeMap<String, String>),
}

impl ErrorPayload {
  pub fn from_json(body: &Value) -> Self {
    match body {
      Value::String(s) if !s.is_empty() => ErrorPayload::Message(s.clone()),
      Value::Array(items) => match items.first() {
        Some(first) => ErrorPayload::Message(value_to_string(first)),
        None => ErrorPayload::Empty,
      },
      Value::Object(obj) => {
        for key in ["error", "message", "detail"] {
          if let Some(Value::String(s)) = obj.get(key) {
            return ErrorPayload::Message(s.clone());
          }
        }
        if obj.is_empty() {
          return ErrorPayload::Empty;
        }
        let fields = obj
          .iter()
          .map(|(k, v)| (k.clone(), value_to_string(v)))
          .collect();
        ErrorPayload::Fields(fields)
      }
      _ => ErrorPayload::Empty,
    }
  }

  /// The flat message, if the payload is one.
  pub fn message(&self) -> Option<&str> {
    match self {
      ErrorPayload::Message(m) => Some(m),
      _ => None,
    }
  }
}

// ─── Catch-all routing ───────────────────────────────────────────────────────

/// Send a non-field message containing `contains` to `fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchAllRule {
  pub contains: &'static str,
  pub fields:   &'static [&'static str],
}

/// Where non-field errors land on one screen: the first matching rule, or
/// else the fallback fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchAll {
  pub rules:    &'static [CatchAllRule],
  pub fallback: &'static [&'static str],
}

impl CatchAll {
  /// Everything goes to a generic `form` banner field.
  pub const FORM: CatchAll = CatchAll { rules: &[], fallback: &["form"] };

  pub fn targets(&self, message: &str) -> &'static [&'static str] {
    self
      .rules
      .iter()
      .find(|r| message.contains(r.contains))
      .map(|r| r.fields)
      .unwrap_or(self.fallback)
  }
}

/// Redistribute a rejected payload into per-field messages.
///
/// Field keys are copied verbatim. Non-field keys go to the fields chosen by
/// `catch_all`. Flat messages produce no field errors.
pub fn map_error_payload(payload: &ErrorPayload, catch_all: &CatchAll) -> FieldErrors {
  let mut errors = FieldErrors::new();
  let ErrorPayload::Fields(fields) = payload else {
    return errors;
  };
  for (key, message) in fields {
    if NON_FIELD_KEYS.contains(&key.as_str()) {
      for target in catch_all.targets(message) {
        errors.insert(*target, message.clone());
      }
    } else {
      errors.insert(key.clone(), message.clone());
    }
  }
  errors
}

// ─── Notices ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
  Info,
  Success,
  Error,
}

/// The one-line banner under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub tone: Tone,
  pub text: String,
}

impl Notice {
  pub fn info(text: impl Into<String>) -> Self { Self { tone: Tone::Info, text: text.into() } }

  pub fn success(text: impl Into<String>) -> Self {
    Self { tone: Tone::Success, text: text.into() }
  }

  pub fn error(text: impl Into<String>) -> Self { Self { tone: Tone::Error, text: text.into() } }
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// The state behind one form screen.
#[derive(Debug, Clone)]
pub struct FormController {
  pub spec:       &'static FormSpec,
  pub draft:      FormDraft,
  pub errors:     FieldErrors,
  pub notice:     Option<Notice>,
  pub submitting: bool,
  /// Editing an existing record; create-only requirements are relaxed.
  pub editing:    bool,
}

impl FormController {
  pub fn new(spec: &'static FormSpec) -> Self {
    Self {
      spec,
      draft: FormDraft::blank(spec),
      errors: FieldErrors::new(),
      notice: None,
      submitting: false,
      editing: false,
    }
  }

  pub fn value(&self, name: &str) -> &str { self.draft.get(name) }

  /// Write `value` into the draft and clear that field's error.
  pub fn on_field_change(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
    if !self.draft.contains(name) {
      return Err(Error::UnknownField(name.to_owned()));
    }
    self.draft.set(name, value);
    self.errors.remove(name);
    Ok(())
  }

  /// Required fields whose value is blank, in form order.
  pub fn missing_required(&self) -> Vec<&'static str> {
    self
      .spec
      .fields
      .iter()
      .filter(|f| match f.required {
        Requirement::Optional => false,
        Requirement::Required => true,
        Requirement::CreateOnly => !self.editing,
      })
      .filter(|f| f.kind != FieldKind::ReadOnly)
      .filter(|f| self.draft.get(f.name).trim().is_empty())
      .map(|f| f.name)
      .collect()
  }

  /// Start a submit attempt. Clears the previous outcome; when a required
  /// field is blank the attempt is refused and those fields are marked, so
  /// the caller must not send anything.
  pub fn begin_submit(&mut self) -> bool {
    self.errors = FieldErrors::new();
    self.notice = None;
    let missing = self.missing_required();
    if !missing.is_empty() {
      for field in missing {
        self.errors.insert(field, REQUIRED_MESSAGE);
      }
      return false;
    }
    self.submitting = true;
    true
  }

  /// Mark the attempt as succeeded with `message`, or the screen's default.
  pub fn succeed(&mut self, message: Option<&str>) {
    self.submitting = false;
    let text = message.unwrap_or(self.spec.success_message);
    self.notice = Some(Notice::success(text));
  }

  /// Mark the attempt as failed. `None` means no response arrived.
  pub fn fail(&mut self, payload: Option<&ErrorPayload>) {
    self.submitting = false;
    self.errors = FieldErrors::new();
    let text = match payload {
      None => self.spec.transport_message.to_owned(),
      Some(p @ ErrorPayload::Fields(_)) => {
        self.errors = map_error_payload(p, &self.spec.catch_all);
        self.spec.invalid_message.unwrap_or(self.spec.failure_message).to_owned()
      }
      Some(ErrorPayload::Message(m)) => m.clone(),
      Some(ErrorPayload::Empty) => self.spec.failure_message.to_owned(),
    };
    self.notice = Some(Notice::error(text));
  }

  /// Fail the attempt with a single field error produced client-side.
  pub fn fail_field(&mut self, field: &str, message: &str) {
    self.submitting = false;
    self.errors.insert(field, message);
    let text = self.spec.invalid_message.unwrap_or(message);
    self.notice = Some(Notice::error(text));
  }

  /// Blank every field except `keep`.
  pub fn reset(&mut self, keep: &[&str]) {
    let mut fresh = FormDraft::blank(self.spec);
    for name in keep {
      fresh.set(name, self.draft.get(name).to_owned());
    }
    self.draft = fresh;
    self.errors = FieldErrors::new();
    self.editing = false;
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::forms;

  #[test]
  fn list_values_are_unwrapped() {
    let payload = ErrorPayload::from_json(&json!({
      "student_email": ["Enter a valid email address."],
      "year_of_study": "Ensure this value is less than or equal to 6."
    }));
    let errors = map_error_payload(&payload, &CatchAll::FORM);
    assert_eq!(errors.get("student_email"), Some("Enter a valid email address."));
    assert_eq!(
      errors.get("year_of_study"),
      Some("Ensure this value is less than or equal to 6.")
    );
  }

  #[test]
  fn error_key_is_a_flat_message() {
    let payload = ErrorPayload::from_json(&json!({ "error": "Invalid credentials" }));
    assert_eq!(payload, ErrorPayload::Message("Invalid credentials".into()));
    assert!(map_error_payload(&payload, &CatchAll::FORM).is_empty());
  }

  #[test]
  fn start_before_end_goes_to_both_date_fields() {
    let payload = ErrorPayload::from_json(&json!({
      "__all__": ["Start Date must be before End Date."]
    }));
    let errors = map_error_payload(&payload, &forms::ORGANISATION_PREFERENCE.catch_all);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("start_date"), Some("Start Date must be before End Date."));
    assert_eq!(errors.get("end_date"), Some("Start Date must be before End Date."));
  }

  #[test]
  fn start_in_past_goes_to_start_date_only() {
    let payload = ErrorPayload::from_json(&json!({
      "__all__": ["Start date cannot be in the past."]
    }));
    let errors = map_error_payload(&payload, &forms::ORGANISATION_PREFERENCE.catch_all);
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["start_date"]);
  }

  #[test]
  fn unmatched_non_field_error_goes_to_fallback() {
    let payload = ErrorPayload::from_json(&json!({
      "non_field_errors": ["Something odd."]
    }));
    let org = map_error_payload(&payload, &forms::ORGANISATION_PREFERENCE.catch_all);
    assert_eq!(org.get("form"), Some("Something odd."));

    let student = map_error_payload(&payload, &forms::STUDENT_PREFERENCE.catch_all);
    assert_eq!(student.get("available_from"), Some("Something odd."));
  }

  #[test]
  fn editing_a_field_clears_only_its_error() {
    let mut form = FormController::new(&forms::STUDENT_PREFERENCE);
    form.errors.insert("pref_location", "bad");
    form.errors.insert("available_to", "bad");

    form.on_field_change("pref_location", "Gaborone").unwrap();
    assert_eq!(form.value("pref_location"), "Gaborone");
    assert_eq!(form.errors.get("pref_location"), None);
    assert_eq!(form.errors.get("available_to"), Some("bad"));
  }

  #[test]
  fn unknown_field_is_rejected() {
    let mut form = FormController::new(&forms::ADMIN_LOGIN);
    assert!(form.on_field_change("nickname", "x").is_err());
  }

  #[test]
  fn placeholder_select_blocks_submit() {
    let mut form = FormController::new(&forms::STUDENT_PREFERENCE);
    form.draft.set("student_id", "202100123");
    form.on_field_change("pref_location", "Gaborone").unwrap();
    form.on_field_change("available_from", "2030-01-01").unwrap();
    form.on_field_change("available_to", "2030-03-01").unwrap();
    form.on_field_change("desired_skill", "S1").unwrap();

    assert!(!form.begin_submit());
    assert_eq!(form.errors.fields().collect::<Vec<_>>(), vec!["preferred_industry"]);
    assert!(!form.submitting);
  }

  #[test]
  fn create_only_password_is_relaxed_when_editing() {
    let mut form = FormController::new(&forms::ADMIN_STUDENT);
    for (name, value) in [
      ("student_id", "202100123"),
      ("first_name", "Neo"),
      ("last_name", "Kgosi"),
      ("year_of_study", "3"),
      ("student_email", "neo@ub.ac.bw"),
      ("student_contact_number", "71234567"),
    ] {
      form.on_field_change(name, value).unwrap();
    }
    assert_eq!(form.missing_required(), vec!["password"]);
    form.editing = true;
    assert!(form.missing_required().is_empty());
  }

  #[test]
  fn field_failure_shows_invalid_banner() {
    let mut form = FormController::new(&forms::LOGBOOK);
    let payload = ErrorPayload::from_json(&json!({ "__all__": ["Log entry cannot be empty."] }));
    form.fail(Some(&payload));
    assert_eq!(form.errors.get("log_entry"), Some("Log entry cannot be empty."));
    assert_eq!(
      form.notice.unwrap().text,
      "Submission failed. Please fix the highlighted errors below."
    );
  }

  #[test]
  fn transport_failure_shows_generic_message() {
    let mut form = FormController::new(&forms::STUDENT_PREFERENCE);
    form.fail(None);
    assert!(form.errors.is_empty());
    assert_eq!(form.notice.unwrap().text, "Server error. Try again later.");
  }

  #[test]
  fn reset_keeps_immutable_fields() {
    let mut form = FormController::new(&forms::STUDENT_PREFERENCE);
    form.draft.set("student_id", "202100123");
    form.on_field_change("pref_location", "Maun").unwrap();
    form.reset(&["student_id"]);
    assert_eq!(form.draft, {
      let mut d = FormDraft::blank(&forms::STUDENT_PREFERENCE);
      d.set("student_id", "202100123");
      d
    });
  }

  #[test]
  fn prefill_stringifies_numbers_and_skips_unknown_keys() {
    let mut draft = FormDraft::blank(&forms::ORGANISATION_PREFERENCE_EDIT);
    draft.prefill(&json!({
      "pref_id": 5,
      "pref_education_level": 3,
      "positions_available": 2,
      "start_date": "2030-01-01",
      "preferred_fields": ["IND01"],
      "end_date": null
    }));
    assert_eq!(draft.get("pref_education_level"), "3");
    assert_eq!(draft.get("preferred_fields"), "IND01");
    assert_eq!(draft.get("end_date"), "");
    assert!(!draft.contains("pref_id"));
  }
}

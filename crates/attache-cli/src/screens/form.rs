//! Form screens: a [`FormController`] plus what each form does on submit.
//!
//! Three failure styles exist. Field-style forms spread a rejected payload
//! over their fields; message-style forms show the server's flat `error`
//! or a fallback; fixed-style forms always show their fallback.

use std::{collections::BTreeMap, sync::Arc};

use anyhow::Context as _;
use attache_client::{ApiError, ReferenceCache};
use attache_core::{
  form::{ErrorPayload, FormController, FormDraft},
  forms::{self, FieldKind, FieldSpec, FormSpec, OnSuccess},
  logbook,
  model::LogbookSubmission,
  reference::{ReferenceList, ReferenceOption, label_for},
  role::Role,
  route::Route,
  session::{Session, SessionStore},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::app::Services;

// ─── Actions ─────────────────────────────────────────────────────────────────

/// Which form a screen shows, with the ids its submit needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
  StudentLogin,
  StudentRegister,
  OrganisationLogin,
  OrganisationRegister,
  SupervisorLogin,
  SupervisorRegister,
  AdminLogin,
  AdminRegister,
  SubmitStudentPreference,
  /// `None` when the student has no preference on record yet.
  EditStudentPreference { pref_id: Option<String> },
  SubmitOrganisationPreference { org_id: i64 },
  EditOrganisationPreference { org_id: String, pref_id: Option<i64> },
  Logbook,
  StudentProfile { student_id: String },
  StudentPassword { student_id: String },
  OrganisationProfile { org_id: String },
  OrganisationPassword { org_id: String },
  /// `Some(id)` while an existing student is being edited.
  AdminStudent { editing: Option<String> },
  AdminOrganisation { editing: Option<i64> },
}

impl FormAction {
  pub fn spec(&self) -> &'static FormSpec {
    match self {
      FormAction::StudentLogin => &forms::STUDENT_LOGIN,
      FormAction::StudentRegister => &forms::STUDENT_REGISTER,
      FormAction::OrganisationLogin => &forms::ORGANISATION_LOGIN,
      FormAction::OrganisationRegister => &forms::ORGANISATION_REGISTER,
      FormAction::SupervisorLogin => &forms::SUPERVISOR_LOGIN,
      FormAction::SupervisorRegister => &forms::SUPERVISOR_REGISTER,
      FormAction::AdminLogin => &forms::ADMIN_LOGIN,
      FormAction::AdminRegister => &forms::ADMIN_REGISTER,
      FormAction::SubmitStudentPreference => &forms::STUDENT_PREFERENCE,
      FormAction::EditStudentPreference { .. } => &forms::STUDENT_PREFERENCE_EDIT,
      FormAction::SubmitOrganisationPreference { .. } => &forms::ORGANISATION_PREFERENCE,
      FormAction::EditOrganisationPreference { .. } => &forms::ORGANISATION_PREFERENCE_EDIT,
      FormAction::Logbook => &forms::LOGBOOK,
      FormAction::StudentProfile { .. } => &forms::STUDENT_PROFILE,
      FormAction::StudentPassword { .. } => &forms::STUDENT_PASSWORD,
      FormAction::OrganisationProfile { .. } => &forms::ORGANISATION_PROFILE,
      FormAction::OrganisationPassword { .. } => &forms::ORGANISATION_PASSWORD,
      FormAction::AdminStudent { .. } => &forms::ADMIN_STUDENT,
      FormAction::AdminOrganisation { .. } => &forms::ADMIN_ORGANISATION,
    }
  }

  /// The sibling login or registration screen of an auth form.
  pub fn auth_switch(&self) -> Option<Route> {
    let (role, is_login) = match self {
      FormAction::StudentLogin => (Role::Student, true),
      FormAction::StudentRegister => (Role::Student, false),
      FormAction::OrganisationLogin => (Role::Organisation, true),
      FormAction::OrganisationRegister => (Role::Organisation, false),
      FormAction::SupervisorLogin => (Role::Supervisor, true),
      FormAction::SupervisorRegister => (Role::Supervisor, false),
      FormAction::AdminLogin => (Role::Admin, true),
      FormAction::AdminRegister => (Role::Admin, false),
      _ => return None,
    };
    Some(if is_login { role.register_route() } else { role.login_route() })
  }

  /// Supervisor login and registration show a submitting flag and ignore
  /// repeat submits while it is up. No other form de-duplicates.
  fn blocks_resubmit(&self) -> bool {
    matches!(self, FormAction::SupervisorLogin | FormAction::SupervisorRegister)
  }
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// What a key press means to the screen hosting the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
  Ignored,
  Edited,
  Submit,
  Leave,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// Refused or failed; the form shows why.
  Stay,
  /// Accepted and the form stays up.
  Saved,
  Navigate(Route),
}

#[derive(Debug, Clone)]
pub struct FormScreen {
  pub action:  FormAction,
  pub form:    FormController,
  /// Index into [`FormScreen::editable`].
  pub focus:   usize,
  pub options: BTreeMap<ReferenceList, Arc<Vec<ReferenceOption>>>,
}

impl FormScreen {
  pub fn new(action: FormAction) -> Self {
    let form = FormController::new(action.spec());
    Self { action, form, focus: 0, options: BTreeMap::new() }
  }

  /// Fetch the reference lists this form's selects draw from.
  pub async fn load_options(&mut self, references: &ReferenceCache) {
    let (industries, skills) = references.all().await;
    self.set_options(industries, skills);
  }

  pub fn set_options(
    &mut self,
    industries: Arc<Vec<ReferenceOption>>,
    skills: Arc<Vec<ReferenceOption>>,
  ) {
    self.options.insert(ReferenceList::Industries, industries);
    self.options.insert(ReferenceList::Skills, skills);
  }

  pub fn options_for(&self, list: ReferenceList) -> Arc<Vec<ReferenceOption>> {
    self.options.get(&list).cloned().unwrap_or_default()
  }

  /// Fields the user can move to; read-only fields are skipped.
  pub fn editable(&self) -> Vec<&'static FieldSpec> {
    self
      .form
      .spec
      .fields
      .iter()
      .filter(|f| f.kind != FieldKind::ReadOnly)
      .collect()
  }

  pub fn focused(&self) -> Option<&'static FieldSpec> {
    self.editable().get(self.focus).copied()
  }

  /// How `field`'s current value reads on screen.
  pub fn display_value(&self, field: &FieldSpec) -> String {
    let value = self.form.value(field.name);
    match field.kind {
      FieldKind::Password => "•".repeat(value.chars().count()),
      FieldKind::Select(list) if value.is_empty() => list.placeholder().to_owned(),
      FieldKind::Select(list) => {
        let options = self.options_for(list);
        label_for(&options, value).unwrap_or(value).to_owned()
      }
      _ => value.to_owned(),
    }
  }

  // ── Keys ──────────────────────────────────────────────────────────────────

  pub fn handle_key(&mut self, key: KeyEvent) -> FormKey {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
      KeyCode::Esc => return FormKey::Leave,
      KeyCode::Char('s') if ctrl => return FormKey::Submit,
      KeyCode::Tab | KeyCode::Down => self.move_focus(1),
      KeyCode::BackTab | KeyCode::Up => self.move_focus(-1),
      KeyCode::Enter => {
        if self.focused().is_some_and(|f| f.kind == FieldKind::Multiline) {
          self.edit(|v| v.push('\n'));
        } else {
          return FormKey::Submit;
        }
      }
      KeyCode::Left => self.cycle(-1),
      KeyCode::Right => self.cycle(1),
      KeyCode::Backspace => self.edit(|v| {
        v.pop();
      }),
      KeyCode::Char(c) if !ctrl => {
        let accepted = match self.focused().map(|f| f.kind) {
          Some(FieldKind::Number) => c.is_ascii_digit(),
          Some(FieldKind::Date) => c.is_ascii_digit() || c == '-',
          _ => true,
        };
        if accepted {
          self.edit(|v| v.push(c));
        }
      }
      _ => return FormKey::Ignored,
    }
    FormKey::Edited
  }

  fn move_focus(&mut self, step: isize) {
    let len = self.editable().len() as isize;
    if len > 0 {
      self.focus = (self.focus as isize + step).rem_euclid(len) as usize;
    }
  }

  fn edit(&mut self, f: impl FnOnce(&mut String)) {
    let Some(field) = self.focused() else {
      return;
    };
    if matches!(field.kind, FieldKind::Select(_) | FieldKind::ReadOnly) {
      return;
    }
    let mut value = self.form.value(field.name).to_owned();
    f(&mut value);
    self.set(field.name, value);
  }

  /// Step a select through its options; the placeholder sits before the
  /// first one.
  fn cycle(&mut self, step: isize) {
    let Some(field) = self.focused() else {
      return;
    };
    let FieldKind::Select(list) = field.kind else {
      return;
    };
    let options = self.options_for(list);
    let current = self.form.value(field.name);
    let slots = options.len() as isize + 1;
    let pos = options
      .iter()
      .position(|o| o.id == current)
      .map_or(0, |i| i as isize + 1);
    let next = (pos + step).rem_euclid(slots);
    let value = match next {
      0 => String::new(),
      n => options[(n - 1) as usize].id.clone(),
    };
    self.set(field.name, value);
  }

  pub fn set(&mut self, name: &str, value: impl Into<String>) {
    if let Err(e) = self.form.on_field_change(name, value) {
      warn!(error = %e, form = self.form.spec.title, "edit ignored");
    }
  }

  // ── Submit ────────────────────────────────────────────────────────────────

  /// Validate, send, and record the outcome on the form.
  pub async fn submit<S: SessionStore>(
    &mut self,
    services: &Services<S>,
  ) -> anyhow::Result<Outcome> {
    if self.form.submitting && self.action.blocks_resubmit() {
      return Ok(Outcome::Stay);
    }
    if !self.form.begin_submit() {
      return Ok(Outcome::Stay);
    }

    let api = &services.api;
    let draft = self.form.draft.clone();

    match self.action.clone() {
      // Login
      FormAction::StudentLogin => match api.login_student(&draft.to_json()).await {
        Ok(_) => {
          let session = Session::new(Role::Student, draft.get("student_id").trim());
          self.log_in(services, session).await
        }
        Err(e) => Ok(self.fail_message(&e)),
      },
      FormAction::OrganisationLogin => match api.login_organisation(&draft.to_json()).await {
        Ok(resp) => {
          let mut session = Session::new(Role::Organisation, resp.organisation_id)
            .with_email(draft.get("contact_email").trim());
          if let Some(name) = resp.org_name.filter(|n| !n.is_empty()) {
            session = session.with_display_name(name);
          }
          self.log_in(services, session).await
        }
        Err(e) => Ok(self.fail_message(&e)),
      },
      FormAction::SupervisorLogin => match api.login_supervisor(&draft.to_json()).await {
        Ok(resp) => {
          let session = Session::new(Role::Supervisor, resp.user.id)
            .with_email(resp.user.email)
            .with_token(resp.token);
          self.log_in(services, session).await
        }
        Err(e) if e.status() == Some(401) => {
          self.fail_with(&e, forms::SUPERVISOR_BAD_CREDENTIALS);
          Ok(Outcome::Stay)
        }
        Err(e) => Ok(self.fail_message(&e)),
      },
      FormAction::AdminLogin => match api.login_admin(&draft.to_json()).await {
        Ok(resp) => {
          let session = Session::new(Role::Admin, resp.admin_id).with_email(resp.email);
          self.log_in(services, session).await
        }
        Err(e) => Ok(self.fail_message(&e)),
      },

      // Registration
      FormAction::StudentRegister => {
        let result = api.register_student(&draft.to_json()).await;
        Ok(self.settle_fields(result.map(drop)))
      }
      FormAction::OrganisationRegister => {
        let result = api.register_organisation(&draft.to_json()).await;
        Ok(self.settle_fields(result.map(drop)))
      }
      FormAction::SupervisorRegister => {
        if draft.get("password") != draft.get("confirm_password") {
          self.form.fail_field("confirm_password", forms::SUPERVISOR_PASSWORD_MISMATCH);
          return Ok(Outcome::Stay);
        }
        let body = draft.to_json_without(&["confirm_password"]);
        let result = api.register_supervisor(&body).await;
        Ok(self.settle_fields(result.map(drop)))
      }
      FormAction::AdminRegister => match api.register_admin(&draft.to_json()).await {
        Ok(_) => Ok(self.finish(None)),
        Err(e) => Ok(self.fail_message(&e)),
      },

      // Preferences
      FormAction::SubmitStudentPreference => {
        let result = api.create_student_preference(&student_preference_body(&draft)).await;
        Ok(self.settle_fields(result.map(drop)))
      }
      FormAction::EditStudentPreference { pref_id } => {
        let Some(pref_id) = pref_id else {
          self.no_existing_preference();
          return Ok(Outcome::Stay);
        };
        match api.update_student_preference(&pref_id, &draft.to_json()).await {
          Ok(_) => Ok(self.finish(None)),
          Err(e) => Ok(self.fail_message(&e)),
        }
      }
      FormAction::SubmitOrganisationPreference { org_id } => {
        let body = organisation_preference_body(&draft, org_id);
        let result = api.create_organisation_preference(org_id, &body).await;
        Ok(self.settle_fields(result.map(drop)))
      }
      FormAction::EditOrganisationPreference { org_id, pref_id } => {
        let Some(pref_id) = pref_id else {
          self.no_existing_preference();
          return Ok(Outcome::Stay);
        };
        let body = organisation_preference_update_body(&draft, &org_id);
        match api.update_organisation_preference(pref_id, &body).await {
          Ok(_) => Ok(self.finish(None)),
          Err(e) => Ok(self.fail_message(&e)),
        }
      }

      // Logbook
      FormAction::Logbook => {
        if let Some(message) = logbook::check_entry(draft.get("log_entry")) {
          self.form.fail_field("log_entry", message);
          return Ok(Outcome::Stay);
        }
        let org_name = draft.get("org_name").trim();
        let org_id = match api.org_id_by_name(org_name).await {
          Ok(lookup) => lookup.org_id,
          Err(e) => {
            warn!(error = %e, org_name, "organisation lookup failed");
            self.form.fail_field("org_name", logbook::ORG_NOT_FOUND_MESSAGE);
            return Ok(Outcome::Stay);
          }
        };
        let entry = LogbookSubmission {
          student_id:  draft.get("student_id").to_owned(),
          org_id,
          week_number: draft.get("week_number").to_owned(),
          log_entry:   draft.get("log_entry").to_owned(),
        };
        let result = api.submit_logbook(&entry).await;
        Ok(self.settle_fields(result.map(drop)))
      }

      // Profiles
      FormAction::StudentProfile { student_id } => {
        let result = api.update_student_profile(&student_id, &draft.to_json()).await;
        Ok(self.settle_fixed(result.map(drop)))
      }
      FormAction::OrganisationProfile { org_id } => {
        let result = api.update_organisation_profile(&org_id, &draft.to_json()).await;
        Ok(self.settle_fixed(result.map(drop)))
      }
      FormAction::StudentPassword { student_id } => {
        if draft.get("new_password") != draft.get("confirm_password") {
          self.form.fail_field("confirm_password", forms::STUDENT_PASSWORD_MISMATCH);
          return Ok(Outcome::Stay);
        }
        let result = api.change_student_password(&student_id, &draft.to_json()).await;
        Ok(self.settle_fixed(result.map(drop)))
      }
      FormAction::OrganisationPassword { org_id } => {
        if draft.get("new_password") != draft.get("confirm_password") {
          self.form.fail_field("confirm_password", forms::ORGANISATION_PASSWORD_MISMATCH);
          return Ok(Outcome::Stay);
        }
        let result = api.change_organisation_password(&org_id, &draft.to_json()).await;
        Ok(self.settle_fixed(result.map(drop)))
      }

      // Admin management
      FormAction::AdminStudent { editing } => {
        let body = draft.to_json();
        let result = match &editing {
          Some(id) => api.update_admin_student(id, &body).await,
          None => api.register_student(&body).await.map(drop),
        };
        match result {
          Ok(()) => {
            let message = editing.is_some().then_some("Student updated successfully!");
            self.action = FormAction::AdminStudent { editing: None };
            Ok(self.finish(message))
          }
          Err(e) => Ok(self.fail_message(&e)),
        }
      }
      FormAction::AdminOrganisation { editing } => {
        let body = draft.to_json();
        let result = match editing {
          Some(id) => api.update_admin_organisation(id, &body).await,
          None => api.register_organisation(&body).await.map(drop),
        };
        match result {
          Ok(()) => {
            let message = editing.is_some().then_some("Organization updated successfully!");
            self.action = FormAction::AdminOrganisation { editing: None };
            Ok(self.finish(message))
          }
          Err(e) => Ok(self.fail_message(&e)),
        }
      }
    }
  }

  async fn log_in<S: SessionStore>(
    &mut self,
    services: &Services<S>,
    session: Session,
  ) -> anyhow::Result<Outcome> {
    services
      .session
      .set(&session)
      .await
      .context("saving session")?;
    info!(role = %session.role, id = %session.id, "logged in");
    Ok(self.finish(None))
  }

  /// Record success and apply the form's follow-up.
  fn finish(&mut self, message: Option<&str>) -> Outcome {
    self.form.succeed(message);
    info!(form = self.form.spec.title, "submitted");
    match &self.form.spec.on_success {
      OnSuccess::Stay => Outcome::Saved,
      OnSuccess::Reset { keep } => {
        self.form.reset(keep);
        self.focus = 0;
        Outcome::Saved
      }
      OnSuccess::Navigate(route) => Outcome::Navigate(route.clone()),
    }
  }

  fn settle_fields(&mut self, result: attache_client::Result<()>) -> Outcome {
    match result {
      Ok(()) => self.finish(None),
      Err(e) => {
        warn!(error = %e, form = self.form.spec.title, "submit rejected");
        self.form.fail(e.payload());
        Outcome::Stay
      }
    }
  }

  fn settle_fixed(&mut self, result: attache_client::Result<()>) -> Outcome {
    match result {
      Ok(()) => self.finish(None),
      Err(e) => {
        warn!(error = %e, form = self.form.spec.title, "submit rejected");
        self.form.fail(e.payload().map(|_| &ErrorPayload::Empty));
        Outcome::Stay
      }
    }
  }

  fn fail_message(&mut self, err: &ApiError) -> Outcome {
    let fallback = self.form.spec.failure_message;
    self.fail_with(err, &err.message_or(fallback));
    Outcome::Stay
  }

  /// Show `text` for a rejected request; no response keeps the transport
  /// message.
  fn fail_with(&mut self, err: &ApiError, text: &str) {
    warn!(error = %err, form = self.form.spec.title, "submit rejected");
    match err.payload() {
      Some(_) => self.form.fail(Some(&ErrorPayload::Message(text.to_owned()))),
      None => self.form.fail(None),
    }
  }

  fn no_existing_preference(&mut self) {
    self.form.fail(Some(&ErrorPayload::Message(forms::NO_EXISTING_PREFERENCE.into())));
  }
}

// ─── Request bodies ──────────────────────────────────────────────────────────

/// `POST /student-preference/`: the draft with the industry and skill ids
/// wrapped in single-element lists.
pub fn student_preference_body(draft: &FormDraft) -> Value {
  let mut body = draft.to_json();
  if let Value::Object(map) = &mut body {
    map.insert("preferred_industry".into(), json!([draft.get("preferred_industry")]));
    map.insert("desired_skill".into(), json!([draft.get("desired_skill")]));
  }
  body
}

/// `POST /organisation/{id}/preferences/create/`: the draft plus the numeric
/// organisation id and the list-valued field and skill.
pub fn organisation_preference_body(draft: &FormDraft, org_id: i64) -> Value {
  let mut body = draft.to_json_without(&["organisation_id"]);
  if let Value::Object(map) = &mut body {
    map.insert("organisation".into(), json!(org_id));
    map.insert("preferred_fields".into(), json!([draft.get("preferred_field")]));
    map.insert("required_skills".into(), json!([draft.get("required_skill")]));
  }
  body
}

/// `PUT /organisation-preference/{id}/`: a blank select goes out as `[]`.
pub fn organisation_preference_update_body(draft: &FormDraft, org_id: &str) -> Value {
  let mut body = draft.to_json();
  if let Value::Object(map) = &mut body {
    map.insert("organisation".into(), json!(org_id));
    map.insert("preferred_fields".into(), list_or_empty(draft.get("preferred_fields")));
    map.insert("required_skills".into(), list_or_empty(draft.get("required_skills")));
  }
  body
}

fn list_or_empty(value: &str) -> Value {
  if value.is_empty() { json!([]) } else { json!([value]) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn draft(spec: &FormSpec, values: &[(&str, &str)]) -> FormDraft {
    let mut draft = FormDraft::blank(spec);
    for (k, v) in values {
      draft.set(k, *v);
    }
    draft
  }

  #[test]
  fn student_preference_ids_go_out_as_lists() {
    let draft = draft(&forms::STUDENT_PREFERENCE, &[
      ("student_id", "202100123"),
      ("pref_location", "Gaborone"),
      ("preferred_industry", "IND01"),
      ("desired_skill", "SK07"),
    ]);
    let body = student_preference_body(&draft);
    assert_eq!(body["preferred_industry"], json!(["IND01"]));
    assert_eq!(body["desired_skill"], json!(["SK07"]));
    assert_eq!(body["student_id"], json!("202100123"));
  }

  #[test]
  fn organisation_preference_carries_numeric_organisation() {
    let draft = draft(&forms::ORGANISATION_PREFERENCE, &[
      ("organisation_id", "3"),
      ("preferred_field", "IND02"),
      ("required_skill", "SK01"),
    ]);
    let body = organisation_preference_body(&draft, 3);
    assert_eq!(body["organisation"], json!(3));
    assert_eq!(body["preferred_fields"], json!(["IND02"]));
    assert_eq!(body["required_skills"], json!(["SK01"]));
    assert!(body.get("organisation_id").is_none());
  }

  #[test]
  fn blank_select_updates_as_empty_list() {
    let draft = draft(&forms::ORGANISATION_PREFERENCE_EDIT, &[("preferred_fields", "IND02")]);
    let body = organisation_preference_update_body(&draft, "3");
    assert_eq!(body["organisation"], json!("3"));
    assert_eq!(body["preferred_fields"], json!(["IND02"]));
    assert_eq!(body["required_skills"], json!([]));
  }

  #[test]
  fn focus_skips_read_only_fields_and_wraps() {
    let mut screen = FormScreen::new(FormAction::Logbook);
    assert_eq!(screen.focused().map(|f| f.name), Some("org_name"));
    screen.handle_key(key(KeyCode::BackTab));
    assert_eq!(screen.focused().map(|f| f.name), Some("log_entry"));
    assert_eq!(screen.handle_key(key(KeyCode::Enter)), FormKey::Edited);
    assert_eq!(screen.form.value("log_entry"), "\n");
  }

  #[test]
  fn number_fields_take_digits_only() {
    let mut screen = FormScreen::new(FormAction::Logbook);
    screen.handle_key(key(KeyCode::Tab));
    for c in ['1', 'x', '0'] {
      screen.handle_key(key(KeyCode::Char(c)));
    }
    assert_eq!(screen.form.value("week_number"), "10");
  }

  #[test]
  fn select_cycles_through_placeholder() {
    let mut screen = FormScreen::new(FormAction::SubmitStudentPreference);
    screen.set_options(
      Arc::new(vec![
        ReferenceOption { id: "IND01".into(), name: "Mining".into() },
        ReferenceOption { id: "IND02".into(), name: "Finance".into() },
      ]),
      Arc::default(),
    );
    while screen.focused().map(|f| f.name) != Some("preferred_industry") {
      screen.handle_key(key(KeyCode::Tab));
    }
    let field = screen.focused().unwrap();
    assert_eq!(screen.display_value(field), "Select an industry");

    screen.handle_key(key(KeyCode::Right));
    assert_eq!(screen.form.value("preferred_industry"), "IND01");
    assert_eq!(screen.display_value(field), "Mining");

    screen.handle_key(key(KeyCode::Left));
    screen.handle_key(key(KeyCode::Left));
    assert_eq!(screen.form.value("preferred_industry"), "IND02");

    // Typing does not write into a select.
    screen.handle_key(key(KeyCode::Char('z')));
    assert_eq!(screen.form.value("preferred_industry"), "IND02");
  }

  #[test]
  fn passwords_are_masked() {
    let mut screen = FormScreen::new(FormAction::AdminLogin);
    screen.set("password", "hunter2");
    let field = forms::ADMIN_LOGIN.field("password").unwrap();
    assert_eq!(screen.display_value(field), "•••••••");
  }
}

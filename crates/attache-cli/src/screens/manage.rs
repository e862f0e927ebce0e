//! Admin management of students or organisations: a filterable list beside
//! a create/edit form.

use attache_core::{
  form::Notice,
  model::{Organisation, Student},
  reference::{ReferenceList, label_for},
  route::Route,
  session::SessionStore,
};
use crossterm::event::{KeyCode, KeyEvent};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use tracing::{info, warn};

use super::{
  Action,
  form::{FormAction, FormKey, FormScreen, Outcome},
};
use crate::app::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageKind {
  Students,
  Organisations,
}

impl ManageKind {
  pub fn title(self) -> &'static str {
    match self {
      ManageKind::Students => "Manage Students",
      ManageKind::Organisations => "Manage Organisations",
    }
  }

  fn fetch_failed(self) -> &'static str {
    match self {
      ManageKind::Students => "Failed to fetch students",
      ManageKind::Organisations => "Failed to fetch organizations",
    }
  }

  fn deleted(self) -> &'static str {
    match self {
      ManageKind::Students => "Student deleted successfully!",
      ManageKind::Organisations => "Organization deleted successfully!",
    }
  }

  fn blank_form(self) -> FormAction {
    match self {
      ManageKind::Students => FormAction::AdminStudent { editing: None },
      ManageKind::Organisations => FormAction::AdminOrganisation { editing: None },
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageFocus {
  List,
  Form,
  Filter,
  /// Waiting for `y` to delete the row under the cursor.
  ConfirmDelete,
}

#[derive(Debug, Clone)]
pub struct ManageScreen {
  pub kind:          ManageKind,
  pub students:      Vec<Student>,
  pub organisations: Vec<Organisation>,
  /// Index into [`ManageScreen::visible`].
  pub cursor:        usize,
  pub filter:        String,
  pub focus:         ManageFocus,
  pub form:          FormScreen,
  pub message:       Option<Notice>,
}

impl ManageScreen {
  pub async fn mount<S: SessionStore>(services: &Services<S>, kind: ManageKind) -> Self {
    let mut form = FormScreen::new(kind.blank_form());
    if kind == ManageKind::Organisations {
      form.load_options(&services.references).await;
    }
    let mut screen = Self {
      kind,
      students: Vec::new(),
      organisations: Vec::new(),
      cursor: 0,
      filter: String::new(),
      focus: ManageFocus::List,
      form,
      message: None,
    };
    screen.reload(services).await;
    screen
  }

  /// Refetch the list. A failure keeps the old rows and says so.
  pub async fn reload<S: SessionStore>(&mut self, services: &Services<S>) {
    let result = match self.kind {
      ManageKind::Students => services.api.admin_students().await.map(|rows| {
        self.students = rows;
      }),
      ManageKind::Organisations => services.api.admin_organisations().await.map(|rows| {
        self.organisations = rows;
      }),
    };
    if let Err(e) = result {
      warn!(error = %e, kind = self.kind.title(), "list unavailable");
      self.message = Some(Notice::error(self.kind.fetch_failed()));
    }
    self.clamp_cursor();
  }

  // ── Rows ──────────────────────────────────────────────────────────────────

  fn len(&self) -> usize {
    match self.kind {
      ManageKind::Students => self.students.len(),
      ManageKind::Organisations => self.organisations.len(),
    }
  }

  /// Cells shown for row `index` of the unfiltered list.
  pub fn cells(&self, index: usize) -> Vec<String> {
    match self.kind {
      ManageKind::Students => {
        let s = &self.students[index];
        vec![
          s.student_id.clone(),
          s.full_name(),
          s.year_of_study.clone(),
          s.student_email.clone(),
          s.student_contact_number.clone(),
        ]
      }
      ManageKind::Organisations => {
        let o = &self.organisations[index];
        vec![
          o.org_id.to_string(),
          o.org_name.clone(),
          self.industry_name(o),
          o.town.clone(),
          o.contact_email.clone(),
        ]
      }
    }
  }

  pub fn headers(&self) -> [&'static str; 5] {
    match self.kind {
      ManageKind::Students => ["ID", "Name", "Year", "Email", "Phone"],
      ManageKind::Organisations => ["ID", "Name", "Industry", "Town", "Email"],
    }
  }

  fn industry_name(&self, org: &Organisation) -> String {
    if let Some(name) = &org.industry_name {
      return name.clone();
    }
    let options = self.form.options_for(ReferenceList::Industries);
    label_for(&options, &org.industry)
      .unwrap_or(&org.industry)
      .to_owned()
  }

  /// Indices of the rows matching the filter, in list order.
  pub fn visible(&self) -> Vec<usize> {
    if self.filter.is_empty() {
      return (0..self.len()).collect();
    }
    let matcher = SkimMatcherV2::default();
    (0..self.len())
      .filter(|&i| {
        let cells = self.cells(i);
        matcher.fuzzy_match(&cells[1], &self.filter).is_some()
          || matcher.fuzzy_match(&cells[0], &self.filter).is_some()
      })
      .collect()
  }

  /// Unfiltered index of the row under the cursor.
  pub fn selected(&self) -> Option<usize> { self.visible().get(self.cursor).copied() }

  fn clamp_cursor(&mut self) {
    let len = self.visible().len();
    if self.cursor >= len {
      self.cursor = len.saturating_sub(1);
    }
  }

  // ── Form ──────────────────────────────────────────────────────────────────

  /// Replace the form with a blank create form, keeping loaded options.
  fn start_new(&mut self) {
    let options = std::mem::take(&mut self.form.options);
    self.form = FormScreen::new(self.kind.blank_form());
    self.form.options = options;
    self.focus = ManageFocus::Form;
  }

  /// Load the selected row into the form for editing.
  fn start_edit(&mut self) {
    let Some(index) = self.selected() else {
      return;
    };
    let (action, record) = match self.kind {
      ManageKind::Students => {
        let s = &self.students[index];
        (
          FormAction::AdminStudent { editing: Some(s.student_id.clone()) },
          serde_json::to_value(s),
        )
      }
      ManageKind::Organisations => {
        let o = &self.organisations[index];
        (
          FormAction::AdminOrganisation { editing: Some(o.org_id) },
          serde_json::to_value(o),
        )
      }
    };
    let record = match record {
      Ok(record) => record,
      Err(e) => {
        warn!(error = %e, "row could not be encoded");
        return;
      }
    };
    let options = std::mem::take(&mut self.form.options);
    self.form = FormScreen::new(action);
    self.form.options = options;
    self.form.form.draft.prefill(&record);
    self.form.form.editing = true;
    self.focus = ManageFocus::Form;
  }

  async fn delete_selected<S: SessionStore>(&mut self, services: &Services<S>) {
    let Some(index) = self.selected() else {
      return;
    };
    let result = match self.kind {
      ManageKind::Students => {
        let id = self.students[index].student_id.clone();
        services.api.delete_admin_student(&id).await.map(|()| id)
      }
      ManageKind::Organisations => {
        let id = self.organisations[index].org_id;
        services.api.delete_admin_organisation(id).await.map(|()| id.to_string())
      }
    };
    match result {
      Ok(id) => {
        info!(%id, kind = self.kind.title(), "deleted");
        self.message = Some(Notice::success(self.kind.deleted()));
        self.reload(services).await;
      }
      Err(e) => {
        warn!(error = %e, "delete failed");
        self.message = Some(Notice::error(e.message_or("Delete failed")));
      }
    }
  }

  // ── Keys ──────────────────────────────────────────────────────────────────

  pub async fn handle_key<S: SessionStore>(
    &mut self,
    key: KeyEvent,
    services: &Services<S>,
  ) -> anyhow::Result<Action> {
    match self.focus {
      ManageFocus::List => Ok(self.list_key(key)),
      ManageFocus::Filter => {
        match key.code {
          KeyCode::Esc => {
            self.filter.clear();
            self.focus = ManageFocus::List;
          }
          KeyCode::Enter => self.focus = ManageFocus::List,
          KeyCode::Backspace => {
            self.filter.pop();
          }
          KeyCode::Char(c) => self.filter.push(c),
          _ => {}
        }
        self.cursor = 0;
        Ok(Action::None)
      }
      ManageFocus::ConfirmDelete => {
        self.focus = ManageFocus::List;
        if key.code == KeyCode::Char('y') {
          self.delete_selected(services).await;
        }
        Ok(Action::None)
      }
      ManageFocus::Form => Ok(match self.form.handle_key(key) {
        FormKey::Leave => {
          self.focus = ManageFocus::List;
          Action::None
        }
        FormKey::Submit => match self.form.submit(services).await? {
          Outcome::Saved => {
            self.reload(services).await;
            Action::None
          }
          Outcome::Navigate(route) => Action::Navigate(route),
          Outcome::Stay => Action::None,
        },
        FormKey::Ignored | FormKey::Edited => Action::None,
      }),
    }
  }

  fn list_key(&mut self, key: KeyEvent) -> Action {
    match key.code {
      KeyCode::Char('q') => return Action::Quit,
      KeyCode::Esc => return Action::Navigate(Route::AdminDashboard),
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.visible().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Char('/') => self.focus = ManageFocus::Filter,
      KeyCode::Char('n') => self.start_new(),
      KeyCode::Char('e') | KeyCode::Enter => self.start_edit(),
      KeyCode::Char('d') => {
        if self.selected().is_some() {
          self.focus = ManageFocus::ConfirmDelete;
        }
      }
      KeyCode::Tab => self.focus = ManageFocus::Form,
      _ => {}
    }
    Action::None
  }
}

#[cfg(test)]
mod tests {
  use attache_client::{ApiClient, ApiConfig};
  use attache_core::session::{MemorySessionStore, SessionContext};
  use crossterm::event::KeyModifiers;
  use httpmock::prelude::*;
  use serde_json::json;

  use super::*;

  fn services(server: &MockServer) -> Services<MemorySessionStore> {
    let api =
      ApiClient::new(ApiConfig { base_url: server.base_url(), timeout: None }).unwrap();
    Services::new(api, SessionContext::new(MemorySessionStore::new()))
  }

  fn press(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn students() -> serde_json::Value {
    json!([
      {
        "student_id": "202100123", "first_name": "Neo", "last_name": "Kgosi",
        "year_of_study": 3, "student_email": "neo@ub.ac.bw",
        "student_contact_number": "71234567"
      },
      {
        "student_id": "202100456", "first_name": "Lesedi", "last_name": "Moyo",
        "year_of_study": 4, "student_email": "lesedi@ub.ac.bw",
        "student_contact_number": "72345678"
      }
    ])
  }

  #[tokio::test]
  async fn filter_narrows_rows_and_delete_reloads() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
      when.method(GET).path("/api/admin/students/");
      then.status(200).json_body(students());
    });
    let delete = server.mock(|when, then| {
      when.method(DELETE).path("/api/admin/students/202100456/");
      then.status(204);
    });

    let services = services(&server);
    let mut screen = ManageScreen::mount(&services, ManageKind::Students).await;
    assert_eq!(screen.visible().len(), 2);

    screen.handle_key(press(KeyCode::Char('/')), &services).await.unwrap();
    for c in "lesedi".chars() {
      screen.handle_key(press(KeyCode::Char(c)), &services).await.unwrap();
    }
    screen.handle_key(press(KeyCode::Enter), &services).await.unwrap();
    assert_eq!(screen.visible(), vec![1]);

    screen.handle_key(press(KeyCode::Char('d')), &services).await.unwrap();
    assert_eq!(screen.focus, ManageFocus::ConfirmDelete);
    screen.handle_key(press(KeyCode::Char('y')), &services).await.unwrap();

    delete.assert();
    list.assert_hits(2);
    assert_eq!(screen.message, Some(Notice::success("Student deleted successfully!")));
  }

  #[tokio::test]
  async fn declining_the_confirmation_sends_nothing() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/api/admin/students/");
      then.status(200).json_body(students());
    });
    let delete = server.mock(|when, then| {
      when.method(DELETE);
      then.status(204);
    });

    let services = services(&server);
    let mut screen = ManageScreen::mount(&services, ManageKind::Students).await;
    screen.handle_key(press(KeyCode::Char('d')), &services).await.unwrap();
    screen.handle_key(press(KeyCode::Char('n')), &services).await.unwrap();

    delete.assert_hits(0);
    assert_eq!(screen.focus, ManageFocus::List);
  }

  #[tokio::test]
  async fn edit_prefills_and_puts_to_the_row() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/api/admin/students/");
      then.status(200).json_body(students());
    });
    let update = server.mock(|when, then| {
      when.method(PUT).path("/api/admin/students/202100123/");
      then.status(200).json_body(json!({}));
    });

    let services = services(&server);
    let mut screen = ManageScreen::mount(&services, ManageKind::Students).await;
    screen.handle_key(press(KeyCode::Char('e')), &services).await.unwrap();
    assert_eq!(screen.focus, ManageFocus::Form);
    assert!(screen.form.form.editing);
    assert_eq!(screen.form.form.value("year_of_study"), "3");

    // No password while editing is fine.
    let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
    screen.handle_key(save, &services).await.unwrap();

    update.assert();
    assert_eq!(
      screen.form.form.notice,
      Some(Notice::success("Student updated successfully!"))
    );
    assert_eq!(screen.form.action, FormAction::AdminStudent { editing: None });
  }

  #[tokio::test]
  async fn failed_fetch_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/api/admin/organisations/");
      then.status(500);
    });
    for path in ["/api/industries/", "/api/skills/"] {
      server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200).json_body(json!([]));
      });
    }

    let services = services(&server);
    let screen = ManageScreen::mount(&services, ManageKind::Organisations).await;
    assert_eq!(screen.message, Some(Notice::error("Failed to fetch organizations")));
  }
}

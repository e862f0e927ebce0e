//! The manual-match screen: student preferences on the left, organisations
//! on the right, and the two-slot board between them.
//!
//! Enter places the highlighted row straight into its slot. Space picks a
//! row up and a second Space drops it, which goes through the same id lookup
//! a pointer drag would.

use attache_client::ApiClient;
use attache_core::{
  form::Notice,
  matching::{DragItem, MATCH_FAILED_MESSAGE, MatchBoard, Pick},
  model::{Organisation, StudentPreference},
  route::Route,
};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchColumn {
  Students,
  Organisations,
}

impl MatchColumn {
  fn index(self) -> usize {
    match self {
      MatchColumn::Students => 0,
      MatchColumn::Organisations => 1,
    }
  }

  fn other(self) -> Self {
    match self {
      MatchColumn::Students => MatchColumn::Organisations,
      MatchColumn::Organisations => MatchColumn::Students,
    }
  }
}

#[derive(Debug, Clone)]
pub struct MatchScreen {
  pub students:      Vec<StudentPreference>,
  pub organisations: Vec<Organisation>,
  pub board:         MatchBoard,
  pub column:        MatchColumn,
  pub cursors:       [usize; 2],
  /// Item picked up and not yet dropped.
  pub held:          Option<DragItem>,
  pub message:       Option<Notice>,
}

impl MatchScreen {
  pub async fn mount(api: &ApiClient) -> Self {
    let (students, organisations) =
      tokio::join!(api.student_preferences(), api.admin_organisations());
    let mut message = None;
    let students = students.unwrap_or_else(|e| {
      warn!(error = %e, "student preferences unavailable");
      message = Some(Notice::error("Failed to fetch student preferences"));
      Vec::new()
    });
    let organisations = organisations.unwrap_or_else(|e| {
      warn!(error = %e, "organisations unavailable");
      message = Some(Notice::error("Failed to fetch organizations"));
      Vec::new()
    });
    Self {
      students,
      organisations,
      board: MatchBoard::new(),
      column: MatchColumn::Students,
      cursors: [0, 0],
      held: None,
      message,
    }
  }

  pub fn cursor(&self, column: MatchColumn) -> usize { self.cursors[column.index()] }

  fn column_len(&self, column: MatchColumn) -> usize {
    match column {
      MatchColumn::Students => self.students.len(),
      MatchColumn::Organisations => self.organisations.len(),
    }
  }

  fn move_cursor(&mut self, step: isize) {
    let len = self.column_len(self.column);
    if len == 0 {
      return;
    }
    let cursor = &mut self.cursors[self.column.index()];
    *cursor = (*cursor as isize + step).clamp(0, len as isize - 1) as usize;
  }

  /// The drag item for the highlighted row of the current column.
  fn highlighted(&self) -> Option<DragItem> {
    let cursor = self.cursor(self.column);
    match self.column {
      MatchColumn::Students => self.students.get(cursor).map(|p| DragItem::StudentPreference {
        student_pref_id: p.student_pref_id.clone(),
      }),
      MatchColumn::Organisations => self
        .organisations
        .get(cursor)
        .map(|o| DragItem::Organisation { org_id: o.org_id }),
    }
  }

  fn select_highlighted(&mut self) {
    let cursor = self.cursor(self.column);
    let pick = match self.column {
      MatchColumn::Students => self.students.get(cursor).cloned().map(Pick::Student),
      MatchColumn::Organisations => {
        self.organisations.get(cursor).cloned().map(Pick::Organisation)
      }
    };
    if let Some(pick) = pick {
      self.board.select(pick);
    }
  }

  async fn submit(&mut self, api: &ApiClient) {
    let request = match self.board.match_request() {
      Ok(request) => request,
      Err(e) => {
        self.message = Some(Notice::error(e.to_string()));
        return;
      }
    };
    match api.manual_match(&request).await {
      Ok(resp) => {
        info!(match_id = ?resp.match_id, "match created");
        self.message = resp.message.map(Notice::success);
        self.board.on_matched();
      }
      Err(e) => {
        warn!(error = %e, "match rejected");
        self.message = Some(Notice::error(e.message_or(MATCH_FAILED_MESSAGE)));
      }
    }
  }

  pub async fn handle_key(&mut self, key: KeyEvent, api: &ApiClient) -> Action {
    match key.code {
      KeyCode::Char('q') => return Action::Quit,
      KeyCode::Esc => {
        if self.held.take().is_none() {
          return Action::Navigate(Route::AdminDashboard);
        }
      }
      KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
        self.column = self.column.other();
      }
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
      KeyCode::Enter => self.select_highlighted(),
      KeyCode::Char(' ') => match self.held.take() {
        Some(item) => {
          if !self.board.drop_item(&item, &self.students, &self.organisations) {
            warn!(?item, "dropped item is no longer listed");
          }
        }
        None => self.held = self.highlighted(),
      },
      KeyCode::Char('m') => self.submit(api).await,
      _ => {}
    }
    Action::None
  }
}

#[cfg(test)]
mod tests {
  use attache_client::ApiConfig;
  use attache_core::matching::{MatchState, Slot};
  use crossterm::event::KeyModifiers;
  use httpmock::prelude::*;
  use serde_json::json;

  use super::*;

  fn press(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  async fn mounted(server: &MockServer) -> (ApiClient, MatchScreen) {
    server.mock(|when, then| {
      when.method(GET).path("/api/student-preferences/");
      then.status(200).json_body(json!([
        { "student_pref_id": 4, "student_name": "Neo Kgosi" },
        { "student_pref_id": 7, "student_name": "Lesedi Moyo" }
      ]));
    });
    server.mock(|when, then| {
      when.method(GET).path("/api/admin/organisations/");
      then.status(200).json_body(json!([{ "org_id": 3, "org_name": "Debswana" }]));
    });
    let api =
      ApiClient::new(ApiConfig { base_url: server.base_url(), timeout: None }).unwrap();
    let screen = MatchScreen::mount(&api).await;
    (api, screen)
  }

  #[tokio::test]
  async fn one_slot_refuses_without_a_request() {
    let server = MockServer::start();
    let (api, mut screen) = mounted(&server).await;
    let post = server.mock(|when, then| {
      when.method(POST).path("/api/manual-match/");
      then.status(201).json_body(json!({ "message": "ok" }));
    });

    screen.handle_key(press(KeyCode::Enter), &api).await;
    assert_eq!(screen.board.state(), MatchState::OneSelected(Slot::Student));
    screen.handle_key(press(KeyCode::Char('m')), &api).await;

    post.assert_hits(0);
    assert_eq!(
      screen.message,
      Some(Notice::error("Please select both a student preference and an organisation."))
    );
  }

  #[tokio::test]
  async fn drag_and_drop_then_match_clears_the_board() {
    let server = MockServer::start();
    let (api, mut screen) = mounted(&server).await;
    let post = server.mock(|when, then| {
      when.method(POST).path("/api/manual-match/").json_body(json!({
        "student_pref_id": 7,
        "organisation_id": 3,
        "admin_note": "Matched manually via drag-and-drop"
      }));
      then
        .status(201)
        .json_body(json!({ "message": "Match created successfully", "match_id": 12 }));
    });

    screen.handle_key(press(KeyCode::Down), &api).await;
    screen.handle_key(press(KeyCode::Char(' ')), &api).await;
    assert!(screen.held.is_some());
    screen.handle_key(press(KeyCode::Char(' ')), &api).await;
    screen.handle_key(press(KeyCode::Right), &api).await;
    screen.handle_key(press(KeyCode::Enter), &api).await;
    assert_eq!(screen.board.state(), MatchState::BothSelected);

    screen.handle_key(press(KeyCode::Char('m')), &api).await;
    post.assert();
    assert_eq!(screen.board.state(), MatchState::Empty);
    assert_eq!(screen.message, Some(Notice::success("Match created successfully")));
  }

  #[tokio::test]
  async fn rejection_keeps_the_board_and_shows_the_server_message() {
    let server = MockServer::start();
    let (api, mut screen) = mounted(&server).await;
    server.mock(|when, then| {
      when.method(POST).path("/api/manual-match/");
      then.status(400).json_body(json!({ "message": "Student already matched" }));
    });

    screen.handle_key(press(KeyCode::Enter), &api).await;
    screen.handle_key(press(KeyCode::Tab), &api).await;
    screen.handle_key(press(KeyCode::Enter), &api).await;
    screen.handle_key(press(KeyCode::Char('m')), &api).await;

    assert_eq!(screen.board.state(), MatchState::BothSelected);
    assert_eq!(screen.message, Some(Notice::error("Student already matched")));
  }

  #[tokio::test]
  async fn esc_cancels_a_drag_before_leaving() {
    let server = MockServer::start();
    let (api, mut screen) = mounted(&server).await;
    screen.handle_key(press(KeyCode::Char(' ')), &api).await;
    assert_eq!(screen.handle_key(press(KeyCode::Esc), &api).await, Action::None);
    assert!(screen.held.is_none());
    assert_eq!(
      screen.handle_key(press(KeyCode::Esc), &api).await,
      Action::Navigate(Route::AdminDashboard)
    );
  }
}

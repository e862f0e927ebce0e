//! An organisation's logbook inbox and the single-entry view.

use attache_client::ApiClient;
use attache_core::{
  form::Notice,
  model::{LogbookRecord, LogbookStatus},
  route::Route,
};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use super::Action;

pub const FETCH_FAILED: &str = "Failed to fetch logbooks. Please try again later.";
pub const DETAIL_FAILED: &str = "Failed to load logbook details";
pub const MARK_FAILED: &str = "Failed to update logbook status";

/// Ask the server to mark `record` viewed and mirror it locally once it
/// agrees. Already-viewed records are left alone.
async fn mark_viewed(api: &ApiClient, record: &mut LogbookRecord) -> Option<Notice> {
  if record.status == LogbookStatus::Viewed {
    return None;
  }
  match api.mark_logbook_viewed(&record.logbook_id).await {
    Ok(()) => {
      record.mark_viewed(Utc::now());
      info!(logbook_id = %record.logbook_id, "logbook marked viewed");
      None
    }
    Err(e) => {
      warn!(error = %e, logbook_id = %record.logbook_id, "mark viewed failed");
      Some(Notice::error(MARK_FAILED))
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LogbookListScreen {
  pub org_id:   i64,
  pub logbooks: Vec<LogbookRecord>,
  pub cursor:   usize,
  /// Set when the list could not be fetched.
  pub error:    Option<String>,
  pub notice:   Option<Notice>,
}

impl LogbookListScreen {
  pub async fn mount(api: &ApiClient, org_id: i64) -> Self {
    let (logbooks, error) = match api.organisation_logbooks(org_id).await {
      Ok(logbooks) => (logbooks, None),
      Err(e) => {
        warn!(error = %e, org_id, "logbooks unavailable");
        (Vec::new(), Some(FETCH_FAILED.to_owned()))
      }
    };
    Self { org_id, logbooks, cursor: 0, error, notice: None }
  }

  pub fn selected(&self) -> Option<&LogbookRecord> { self.logbooks.get(self.cursor) }

  pub async fn handle_key(&mut self, key: KeyEvent, api: &ApiClient) -> Action {
    match key.code {
      KeyCode::Char('q') => return Action::Quit,
      KeyCode::Esc => return Action::Navigate(Route::OrganisationDashboard),
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.logbooks.len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Enter => {
        if let Some(record) = self.selected() {
          return Action::Navigate(Route::LogbookDetail {
            logbook_id: record.logbook_id.clone(),
          });
        }
      }
      KeyCode::Char('v') => {
        if let Some(record) = self.logbooks.get_mut(self.cursor) {
          self.notice = mark_viewed(api, record).await;
        }
      }
      _ => {}
    }
    Action::None
  }
}

// ─── Detail ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LogbookDetailScreen {
  pub logbook_id: String,
  pub record:     Option<LogbookRecord>,
  pub error:      Option<String>,
  pub notice:     Option<Notice>,
}

impl LogbookDetailScreen {
  pub async fn mount(api: &ApiClient, logbook_id: &str) -> Self {
    let (record, error) = match api.logbook(logbook_id).await {
      Ok(record) => (Some(record), None),
      Err(e) => {
        warn!(error = %e, logbook_id, "logbook unavailable");
        (None, Some(DETAIL_FAILED.to_owned()))
      }
    };
    Self { logbook_id: logbook_id.to_owned(), record, error, notice: None }
  }

  pub async fn handle_key(&mut self, key: KeyEvent, api: &ApiClient) -> Action {
    match key.code {
      KeyCode::Char('q') => Action::Quit,
      KeyCode::Esc | KeyCode::Backspace => Action::Back,
      KeyCode::Char('v') => {
        if let Some(record) = self.record.as_mut() {
          self.notice = mark_viewed(api, record).await;
        }
        Action::None
      }
      _ => Action::None,
    }
  }
}

#[cfg(test)]
mod tests {
  use attache_client::ApiConfig;
  use crossterm::event::KeyModifiers;
  use httpmock::prelude::*;
  use serde_json::json;

  use super::*;

  fn api(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig { base_url: server.base_url(), timeout: None }).unwrap()
  }

  fn key(c: char) -> KeyEvent { KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE) }

  fn pending(id: &str) -> serde_json::Value {
    json!({
      "logbook_id": id, "student_id": "202100123", "org_id": 3,
      "week_number": 1, "log_entry": "Induction week.", "status": "pending"
    })
  }

  #[tokio::test]
  async fn mark_viewed_updates_the_row_after_the_server_agrees() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/api/organisation/3/logbooks/");
      then.status(200).json_body(json!([pending("AA11BB22"), pending("CC33DD44")]));
    });
    let mark = server.mock(|when, then| {
      when.method(PUT).path("/api/logbooks/AA11BB22/mark-viewed/");
      then.status(200).json_body(json!({ "message": "Logbook marked as viewed." }));
    });

    let api = api(&server);
    let mut screen = LogbookListScreen::mount(&api, 3).await;
    assert_eq!(screen.logbooks.len(), 2);

    screen.handle_key(key('v'), &api).await;
    mark.assert();
    assert_eq!(screen.logbooks[0].status, LogbookStatus::Viewed);
    assert!(screen.logbooks[0].viewed_at.is_some());
    assert_eq!(screen.logbooks[1].status, LogbookStatus::Pending);

    // Already viewed: no second request.
    screen.handle_key(key('v'), &api).await;
    mark.assert_hits(1);
  }

  #[tokio::test]
  async fn failed_mark_leaves_the_row_pending() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/api/logbooks/AA11BB22/");
      then.status(200).json_body(pending("AA11BB22"));
    });
    server.mock(|when, then| {
      when.method(PUT).path("/api/logbooks/AA11BB22/mark-viewed/");
      then.status(500);
    });

    let api = api(&server);
    let mut screen = LogbookDetailScreen::mount(&api, "AA11BB22").await;
    screen.handle_key(key('v'), &api).await;

    assert_eq!(screen.record.as_ref().map(|r| r.status), Some(LogbookStatus::Pending));
    assert_eq!(screen.notice, Some(Notice::error(MARK_FAILED)));
  }

  #[tokio::test]
  async fn fetch_failure_is_shown_not_raised() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/api/organisation/3/logbooks/");
      then.status(500);
    });
    let screen = LogbookListScreen::mount(&api(&server), 3).await;
    assert!(screen.logbooks.is_empty());
    assert_eq!(screen.error.as_deref(), Some(FETCH_FAILED));
  }
}

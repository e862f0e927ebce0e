//! Supervisor report screens. The API has no report endpoints yet, so these
//! only name themselves and lead back to the dashboard.

use attache_core::route::Route;
use crossterm::event::{KeyCode, KeyEvent};

use super::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderScreen {
  pub title: String,
}

impl PlaceholderScreen {
  pub fn for_route(route: &Route) -> Self {
    let title = match route {
      Route::SupervisorSubmitReport => "Submit Supervisor Report".to_owned(),
      Route::SupervisorReportDetails { report_id } => format!("Report {report_id}"),
      _ => "Student Reports".to_owned(),
    };
    Self { title }
  }

  pub fn body(&self) -> &'static str { "Supervisor reports are not available yet." }

  pub fn handle_key(&mut self, key: KeyEvent) -> Action {
    match key.code {
      KeyCode::Char('q') => Action::Quit,
      KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
        Action::Navigate(Route::SupervisorDashboard)
      }
      _ => Action::None,
    }
  }
}

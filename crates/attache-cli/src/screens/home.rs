//! The landing screen: pick a role.

use attache_core::route::Route;
use crossterm::event::{KeyCode, KeyEvent};

use super::Action;

/// Label and destination of each entry. The supervisor entry goes straight
/// to the dashboard, whose guard sends a logged-out supervisor to login.
pub const ENTRIES: [(&str, Route); 4] = [
  ("Student Login", Route::StudentLogin),
  ("Organisation Login", Route::OrganisationLogin),
  ("Supervisor Dashboard", Route::SupervisorDashboard),
  ("Admin Login", Route::AdminLogin),
];

#[derive(Debug, Clone, Default)]
pub struct HomeScreen {
  pub cursor: usize,
}

impl HomeScreen {
  pub fn handle_key(&mut self, key: KeyEvent) -> Action {
    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
      KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
        self.cursor = (self.cursor + 1) % ENTRIES.len();
        Action::None
      }
      KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
        self.cursor = (self.cursor + ENTRIES.len() - 1) % ENTRIES.len();
        Action::None
      }
      KeyCode::Char(c @ '1'..='4') => {
        let index = c as usize - '1' as usize;
        Action::Navigate(ENTRIES[index].1.clone())
      }
      KeyCode::Enter => Action::Navigate(ENTRIES[self.cursor].1.clone()),
      _ => Action::None,
    }
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyModifiers;

  use super::*;

  #[test]
  fn enter_follows_the_cursor() {
    let mut home = HomeScreen::default();
    home.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
    assert_eq!(
      home.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
      Action::Navigate(Route::AdminLogin)
    );
    assert_eq!(
      home.handle_key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE)),
      Action::Navigate(Route::SupervisorDashboard)
    );
  }
}

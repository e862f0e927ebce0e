//! Role dashboards: a row of tabs, each with some text and at most one
//! button.

use attache_core::{
  role::Role,
  route::Route,
  session::{Session, SessionStore},
};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use super::Action;
use crate::app::Services;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardScreen {
  pub session:        Session,
  pub tab:            usize,
  /// Chooses between the submit and edit preference buttons.
  pub has_preference: bool,
}

impl DashboardScreen {
  pub fn new(session: Session) -> Self { Self { session, tab: 0, has_preference: false } }

  /// Build the dashboard, checking whether a student or organisation already
  /// has a preference on record. A failed check counts as "none".
  pub async fn mount<S: SessionStore>(services: &Services<S>, session: Session) -> Self {
    let has_preference = match session.role {
      Role::Student => match services.api.admin_student_preferences().await {
        Ok(prefs) => prefs.iter().any(|p| p.belongs_to(&session.id)),
        Err(e) => {
          warn!(error = %e, "preference check failed");
          false
        }
      },
      Role::Organisation => match services.api.organisation_preferences(&session.id).await {
        Ok(prefs) => !prefs.is_empty(),
        Err(e) => {
          warn!(error = %e, "preference check failed");
          false
        }
      },
      Role::Supervisor | Role::Admin => false,
    };
    Self { has_preference, ..Self::new(session) }
  }

  pub fn role(&self) -> Role { self.session.role }

  pub fn tabs(&self) -> &'static [&'static str] {
    match self.role() {
      Role::Student => &["Dashboard", "Preferences", "Profile", "Job"],
      Role::Organisation => &["Dashboard", "Preferences", "Profile", "Logbooks"],
      Role::Supervisor => &["Dashboard", "Submit Report", "View Reports"],
      Role::Admin => &["Dashboard", "Manage Students", "Manage Organisations", "Manual Match"],
    }
  }

  pub fn greeting(&self) -> String {
    match self.role() {
      Role::Student => format!("Hi {}", self.session.display_name.as_deref().unwrap_or_default())
        .trim_end()
        .to_owned(),
      Role::Organisation => format!("Hi {}", self.org_name()),
      Role::Supervisor => "Supervisor Dashboard".to_owned(),
      Role::Admin => "Admin Dashboard".to_owned(),
    }
  }

  fn org_name(&self) -> &str {
    self.session.display_name.as_deref().unwrap_or("Your Organisation")
  }

  fn email(&self) -> &str { self.session.email.as_deref().unwrap_or_default() }

  /// Text of the current tab; the first line is its heading.
  pub fn lines(&self) -> Vec<String> {
    let title = self.tabs()[self.tab];
    match (self.role(), self.tab) {
      (Role::Student, 0) => vec![
        "Announcements".into(),
        "Industrial Attachment Alert!".into(),
        "Industrial Attachment starts soon. Students are advised to start applying now. \
         Prepare your documents and begin reaching out to organizations."
          .into(),
        "Don't wait, secure your placement early!".into(),
      ],
      (Role::Organisation, 0) => vec![
        "Announcements".into(),
        format!("Welcome {}!", self.org_name()),
        "Here you can manage preferences, view logbooks, and update your organisation profile."
          .into(),
      ],
      (Role::Supervisor, 0) => vec![
        format!(
          "Welcome, {}!",
          self.session.display_name.as_deref().unwrap_or("Supervisor")
        ),
        format!("Email: {}", self.email()),
        "Analytics Coming Soon".into(),
      ],
      (Role::Admin, 0) => vec!["Welcome, Admin!".into(), format!("Email: {}", self.email())],
      (Role::Supervisor, 2) => vec!["View Student Reports".into()],
      (Role::Admin, 3) => vec!["Manual Matching".into()],
      _ => vec![title.to_owned()],
    }
  }

  /// The button on the current tab and where it leads.
  pub fn button(&self) -> Option<(&'static str, Route)> {
    match (self.role(), self.tab) {
      (Role::Student, 1) if self.has_preference => Some(("Edit Preferences", Route::EditPreference)),
      (Role::Student, 1) => Some(("Submit Preferences", Route::SubmitPreference)),
      (Role::Student, 2) => Some(("Edit Profile", Route::EditProfile)),
      (Role::Student, 3) => Some(("Submit Logbook", Route::Logbook)),

      (Role::Organisation, 1) if self.has_preference => {
        Some(("Edit Preferences", Route::OrganisationPreferenceEdit))
      }
      (Role::Organisation, 1) => self
        .org_id()
        .map(|org_id| ("Submit Preference", Route::OrganisationPreferenceCreate { org_id })),
      (Role::Organisation, 2) => Some(("Edit Profile", Route::OrganisationProfileEdit)),
      (Role::Organisation, 3) => self
        .org_id()
        .map(|org_id| ("View Logbooks", Route::OrganisationLogbooks { org_id })),

      (Role::Supervisor, 1) => Some(("Go to Report Submission", Route::SupervisorSubmitReport)),
      (Role::Supervisor, 2) => Some(("View Reports", Route::SupervisorViewReports)),

      (Role::Admin, 1) => Some(("Go to Manage Students", Route::ManageStudents)),
      (Role::Admin, 2) => Some(("Go to Manage Organisations", Route::ManageOrganisations)),
      (Role::Admin, 3) => Some(("Go to Manual Match", Route::ManualMatch)),

      _ => None,
    }
  }

  fn org_id(&self) -> Option<i64> {
    let parsed = self.session.id.parse().ok();
    if parsed.is_none() {
      warn!(id = %self.session.id, "organisation id is not numeric");
    }
    parsed
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> Action {
    let count = self.tabs().len();
    match key.code {
      KeyCode::Char('q') => Action::Quit,
      KeyCode::Char('l') => Action::Logout(self.role()),
      KeyCode::Esc => Action::Navigate(Route::Home),
      KeyCode::Right | KeyCode::Tab => {
        self.tab = (self.tab + 1) % count;
        Action::None
      }
      KeyCode::Left | KeyCode::BackTab => {
        self.tab = (self.tab + count - 1) % count;
        Action::None
      }
      KeyCode::Char(c @ '1'..='9') => {
        let index = c as usize - '1' as usize;
        if index < count {
          self.tab = index;
        }
        Action::None
      }
      KeyCode::Enter => match self.button() {
        Some((_, route)) => Action::Navigate(route),
        None => Action::None,
      },
      _ => Action::None,
    }
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyModifiers;

  use super::*;

  fn press(screen: &mut DashboardScreen, code: KeyCode) -> Action {
    screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  #[test]
  fn preference_button_depends_on_existing_record() {
    let mut screen = DashboardScreen::new(Session::new(Role::Student, "202100123"));
    press(&mut screen, KeyCode::Char('2'));
    assert_eq!(press(&mut screen, KeyCode::Enter), Action::Navigate(Route::SubmitPreference));

    screen.has_preference = true;
    assert_eq!(press(&mut screen, KeyCode::Enter), Action::Navigate(Route::EditPreference));
  }

  #[test]
  fn organisation_buttons_carry_the_numeric_id() {
    let mut screen = DashboardScreen::new(
      Session::new(Role::Organisation, "3").with_email("hr@debswana.bw"),
    );
    assert!(screen.lines().contains(&"Welcome Your Organisation!".to_owned()));
    press(&mut screen, KeyCode::Left);
    assert_eq!(
      press(&mut screen, KeyCode::Enter),
      Action::Navigate(Route::OrganisationLogbooks { org_id: 3 })
    );
  }

  #[test]
  fn logout_names_the_role() {
    let mut screen =
      DashboardScreen::new(Session::new(Role::Admin, "4").with_email("root@ub.ac.bw"));
    assert!(screen.lines().contains(&"Email: root@ub.ac.bw".to_owned()));
    assert_eq!(press(&mut screen, KeyCode::Char('l')), Action::Logout(Role::Admin));
  }
}

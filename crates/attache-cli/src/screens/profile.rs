//! Profile editing: the details form and the change-password form of a
//! student or organisation, shown together.

use attache_client::ApiClient;
use attache_core::{
  form::Notice,
  role::Role,
  session::{Session, SessionStore},
};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use super::{
  Action,
  form::{FormAction, FormKey, FormScreen, Outcome},
};
use crate::app::Services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilePane {
  Details,
  Password,
}

#[derive(Debug, Clone)]
pub struct ProfileScreen {
  pub role:     Role,
  pub details:  FormScreen,
  pub password: FormScreen,
  pub pane:     ProfilePane,
}

impl ProfileScreen {
  /// Build both forms for `session` and prefill the details from the server.
  pub async fn mount(api: &ApiClient, session: &Session) -> Self {
    let id = session.id.clone();
    let (details, password, fetched, load_error) = match session.role {
      Role::Organisation => (
        FormAction::OrganisationProfile { org_id: id.clone() },
        FormAction::OrganisationPassword { org_id: id.clone() },
        api.organisation_profile(&id).await,
        "Failed to load organisation data.",
      ),
      _ => (
        FormAction::StudentProfile { student_id: id.clone() },
        FormAction::StudentPassword { student_id: id.clone() },
        api.student_profile(&id).await,
        "Failed to load profile data.",
      ),
    };

    let mut screen = Self {
      role:     session.role,
      details:  FormScreen::new(details),
      password: FormScreen::new(password),
      pane:     ProfilePane::Details,
    };
    match fetched {
      Ok(record) => screen.details.form.draft.prefill(&record),
      Err(e) => {
        warn!(error = %e, %id, "profile unavailable");
        screen.details.form.notice = Some(Notice::error(load_error));
      }
    }
    screen
  }

  pub fn active(&self) -> &FormScreen {
    match self.pane {
      ProfilePane::Details => &self.details,
      ProfilePane::Password => &self.password,
    }
  }

  fn active_mut(&mut self) -> &mut FormScreen {
    match self.pane {
      ProfilePane::Details => &mut self.details,
      ProfilePane::Password => &mut self.password,
    }
  }

  /// F2 switches between the two forms; Esc returns to the dashboard.
  pub async fn handle_key<S: SessionStore>(
    &mut self,
    key: KeyEvent,
    services: &Services<S>,
  ) -> anyhow::Result<Action> {
    if key.code == KeyCode::F(2) {
      self.pane = match self.pane {
        ProfilePane::Details => ProfilePane::Password,
        ProfilePane::Password => ProfilePane::Details,
      };
      return Ok(Action::None);
    }
    let dashboard = self.role.dashboard_route();
    let form = self.active_mut();
    Ok(match form.handle_key(key) {
      FormKey::Leave => Action::Navigate(dashboard),
      FormKey::Submit => match form.submit(services).await? {
        Outcome::Navigate(route) => Action::Navigate(route),
        Outcome::Stay | Outcome::Saved => Action::None,
      },
      FormKey::Ignored | FormKey::Edited => Action::None,
    })
  }
}

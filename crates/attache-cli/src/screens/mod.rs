//! Screen state, one variant per kind of screen, and the mount sequence that
//! builds it for a route.

pub mod dashboard;
pub mod form;
pub mod home;
pub mod logbooks;
pub mod manage;
pub mod match_board;
pub mod placeholder;
pub mod profile;

use anyhow::{Context as _, bail};
use attache_core::{
  form::Notice,
  forms::NO_EXISTING_PREFERENCE,
  role::Role,
  route::Route,
  session::{Session, SessionStore},
};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::warn;

use crate::app::Services;
use dashboard::DashboardScreen;
use form::{FormAction, FormKey, FormScreen, Outcome};
use home::HomeScreen;
use logbooks::{LogbookDetailScreen, LogbookListScreen};
use manage::{ManageKind, ManageScreen};
use match_board::MatchScreen;
use placeholder::PlaceholderScreen;
use profile::ProfileScreen;

/// What the app should do after a screen handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  None,
  Navigate(Route),
  Back,
  /// Clear the role's session and return to its login screen.
  Logout(Role),
  Quit,
}

pub enum Screen {
  Home(HomeScreen),
  Form(FormScreen),
  Profile(ProfileScreen),
  Dashboard(DashboardScreen),
  Logbooks(LogbookListScreen),
  LogbookDetail(LogbookDetailScreen),
  Manage(ManageScreen),
  Match(MatchScreen),
  Placeholder(PlaceholderScreen),
}

impl Screen {
  pub async fn handle_key<S: SessionStore>(
    &mut self,
    key: KeyEvent,
    services: &Services<S>,
  ) -> anyhow::Result<Action> {
    match self {
      Screen::Home(s) => Ok(s.handle_key(key)),
      Screen::Form(s) => form_key(s, key, services).await,
      Screen::Profile(s) => s.handle_key(key, services).await,
      Screen::Dashboard(s) => Ok(s.handle_key(key)),
      Screen::Logbooks(s) => Ok(s.handle_key(key, &services.api).await),
      Screen::LogbookDetail(s) => Ok(s.handle_key(key, &services.api).await),
      Screen::Manage(s) => s.handle_key(key, services).await,
      Screen::Match(s) => Ok(s.handle_key(key, &services.api).await),
      Screen::Placeholder(s) => Ok(s.handle_key(key)),
    }
  }
}

/// Keys for a standalone form screen. F2 flips between a role's login and
/// registration.
async fn form_key<S: SessionStore>(
  screen: &mut FormScreen,
  key: KeyEvent,
  services: &Services<S>,
) -> anyhow::Result<Action> {
  if key.code == KeyCode::F(2)
    && let Some(route) = screen.action.auth_switch()
  {
    return Ok(Action::Navigate(route));
  }
  Ok(match screen.handle_key(key) {
    FormKey::Leave => Action::Back,
    FormKey::Submit => match screen.submit(services).await? {
      Outcome::Navigate(route) => Action::Navigate(route),
      Outcome::Stay | Outcome::Saved => Action::None,
    },
    FormKey::Ignored | FormKey::Edited => Action::None,
  })
}

// ─── Mount ────────────────────────────────────────────────────────────────────

/// Build the screen for `route`. `session` is the granted session of a
/// guarded route. Fetch failures end up on the screen, never as errors.
pub async fn mount<S: SessionStore>(
  services: &Services<S>,
  route: &Route,
  session: Option<Session>,
) -> anyhow::Result<Screen> {
  let screen = match route {
    Route::Home => Screen::Home(HomeScreen::default()),

    Route::StudentLogin => form(FormAction::StudentLogin),
    Route::StudentRegister => form(FormAction::StudentRegister),
    Route::OrganisationLogin => form(FormAction::OrganisationLogin),
    Route::OrganisationRegister => {
      let mut screen = FormScreen::new(FormAction::OrganisationRegister);
      screen.load_options(&services.references).await;
      Screen::Form(screen)
    }
    Route::SupervisorLogin => form(FormAction::SupervisorLogin),
    Route::SupervisorRegister => form(FormAction::SupervisorRegister),
    Route::AdminLogin => form(FormAction::AdminLogin),
    Route::AdminRegister => form(FormAction::AdminRegister),

    Route::StudentDashboard
    | Route::OrganisationDashboard
    | Route::SupervisorDashboard
    | Route::AdminDashboard => {
      let session = granted(session, route)?;
      Screen::Dashboard(DashboardScreen::mount(services, session).await)
    }

    Route::SubmitPreference => {
      let session = granted(session, route)?;
      let mut screen = FormScreen::new(FormAction::SubmitStudentPreference);
      screen.load_options(&services.references).await;
      screen.set("student_id", session.id);
      Screen::Form(screen)
    }
    Route::EditPreference => {
      let session = granted(session, route)?;
      Screen::Form(edit_student_preference(services, session).await?)
    }
    Route::Logbook => {
      let session = granted(session, route)?;
      let mut screen = FormScreen::new(FormAction::Logbook);
      screen.set("student_id", session.id);
      Screen::Form(screen)
    }
    Route::EditProfile | Route::OrganisationProfileEdit => {
      let session = granted(session, route)?;
      Screen::Profile(ProfileScreen::mount(&services.api, &session).await)
    }

    Route::OrganisationPreferenceCreate { org_id } => {
      let session = granted(session, route)?;
      let org_id = *org_id;
      if session.id != org_id.to_string() {
        services
          .session
          .remember_id(Role::Organisation, &org_id.to_string())
          .await
          .context("updating organisation id")?;
      }
      let mut screen = FormScreen::new(FormAction::SubmitOrganisationPreference { org_id });
      screen.load_options(&services.references).await;
      screen.set("organisation_id", org_id.to_string());
      Screen::Form(screen)
    }
    Route::OrganisationPreferenceEdit => {
      let session = granted(session, route)?;
      Screen::Form(edit_organisation_preference(services, session).await?)
    }
    Route::OrganisationLogbooks { org_id } => {
      Screen::Logbooks(LogbookListScreen::mount(&services.api, *org_id).await)
    }
    Route::LogbookDetail { logbook_id } => {
      Screen::LogbookDetail(LogbookDetailScreen::mount(&services.api, logbook_id).await)
    }

    Route::SupervisorViewReports
    | Route::SupervisorSubmitReport
    | Route::SupervisorReportDetails { .. } => {
      Screen::Placeholder(PlaceholderScreen::for_route(route))
    }

    Route::ManageStudents => {
      Screen::Manage(ManageScreen::mount(services, ManageKind::Students).await)
    }
    Route::ManageOrganisations => {
      Screen::Manage(ManageScreen::mount(services, ManageKind::Organisations).await)
    }
    Route::ManualMatch => Screen::Match(MatchScreen::mount(&services.api).await),
  };
  Ok(screen)
}

fn form(action: FormAction) -> Screen { Screen::Form(FormScreen::new(action)) }

fn granted(session: Option<Session>, route: &Route) -> anyhow::Result<Session> {
  match session {
    Some(session) => Ok(session),
    None => bail!("{route} mounted without a session"),
  }
}

/// The student edit screen, prefilled from the student's own preference.
async fn edit_student_preference<S: SessionStore>(
  services: &Services<S>,
  session: Session,
) -> anyhow::Result<FormScreen> {
  let ((industries, skills), prefs) =
    tokio::join!(services.references.all(), services.api.student_preferences());

  let mut screen = FormScreen::new(FormAction::EditStudentPreference { pref_id: None });
  screen.set_options(industries, skills);

  match prefs {
    Ok(prefs) => match prefs.into_iter().find(|p| p.belongs_to(&session.id)) {
      Some(pref) => {
        let record = serde_json::to_value(&pref).context("encoding preference")?;
        screen.form.draft.prefill(&record);
        screen.action = FormAction::EditStudentPreference { pref_id: Some(pref.student_pref_id) };
      }
      None => {
        screen.form.notice = Some(Notice::info(
          "No existing preferences found. Please submit your preferences.",
        ));
      }
    },
    Err(e) => {
      warn!(error = %e, "student preferences unavailable");
      screen.form.notice = Some(Notice::error("Error fetching preference data."));
    }
  }
  screen.set("student_id", session.id);
  Ok(screen)
}

/// The organisation edit screen, prefilled from the first preference on
/// record.
async fn edit_organisation_preference<S: SessionStore>(
  services: &Services<S>,
  session: Session,
) -> anyhow::Result<FormScreen> {
  let ((industries, skills), prefs) = tokio::join!(
    services.references.all(),
    services.api.organisation_preferences(&session.id)
  );

  let org_id = session.id;
  let mut screen = FormScreen::new(FormAction::EditOrganisationPreference {
    org_id:  org_id.clone(),
    pref_id: None,
  });
  screen.set_options(industries, skills);

  match prefs {
    Ok(prefs) => match prefs.into_iter().next() {
      Some(pref) => {
        let record = serde_json::to_value(&pref).context("encoding preference")?;
        screen.form.draft.prefill(&record);
        screen.action = FormAction::EditOrganisationPreference {
          org_id,
          pref_id: Some(pref.pref_id),
        };
      }
      None => screen.form.notice = Some(Notice::info(NO_EXISTING_PREFERENCE)),
    },
    Err(e) => {
      warn!(error = %e, "organisation preferences unavailable");
      screen.form.notice = Some(Notice::error("Error fetching organisation preference data."));
    }
  }
  Ok(screen)
}

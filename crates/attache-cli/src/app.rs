//! Application state machine and event dispatcher.

use anyhow::Context as _;
use attache_client::{ApiClient, ReferenceCache};
use attache_core::{
  route::Route,
  session::{Mount, SessionContext, SessionStore},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::info;

use crate::screens::{self, Action, Screen, home::HomeScreen};

// ─── Services ─────────────────────────────────────────────────────────────────

/// Everything a screen may talk to, injected into each of them.
pub struct Services<S> {
  pub api:        ApiClient,
  pub session:    SessionContext<S>,
  pub references: ReferenceCache,
}

impl<S> Clone for Services<S> {
  fn clone(&self) -> Self {
    Self {
      api:        self.api.clone(),
      session:    self.session.clone(),
      references: self.references.clone(),
    }
  }
}

impl<S: SessionStore> Services<S> {
  pub fn new(api: ApiClient, session: SessionContext<S>) -> Self {
    let references = ReferenceCache::new(api.clone());
    Self { api, session, references }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  /// The route whose screen is mounted.
  pub route: Route,

  /// State of the mounted screen.
  pub screen: Screen,

  pub services: Services<S>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Routes left behind, most recent last.
  history: Vec<Route>,
}

impl<S: SessionStore> App<S> {
  /// Create an [`App`] showing the home screen. Nothing is fetched until the
  /// first [`App::navigate`].
  pub fn new(services: Services<S>) -> Self {
    Self {
      route: Route::Home,
      screen: Screen::Home(HomeScreen::default()),
      services,
      status_msg: String::new(),
      history: Vec::new(),
    }
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Mount `route`: check its session guard, redirecting to the role's login
  /// screen when the session is absent, then run the screen's fetches.
  pub async fn navigate(&mut self, route: Route) -> anyhow::Result<()> {
    let previous = self.route.clone();
    self.mount(route).await?;
    if previous != self.route {
      self.history.push(previous);
    }
    Ok(())
  }

  /// Return to the previous route, or home when there is none.
  pub async fn back(&mut self) -> anyhow::Result<()> {
    let route = self.history.pop().unwrap_or(Route::Home);
    self.mount(route).await
  }

  async fn mount(&mut self, route: Route) -> anyhow::Result<()> {
    let mut target = route;
    let mut session = None;
    if let Some(role) = target.guard() {
      match self
        .services
        .session
        .require(role)
        .await
        .context("reading session")?
      {
        Mount::Granted(s) => session = Some(s),
        Mount::Redirect(login) => {
          info!(from = %target, to = %login, "no session, redirecting");
          target = login;
        }
      }
    }

    self.status_msg.clear();
    self.screen = screens::mount(&self.services, &target, session).await?;
    info!(route = %target, "mounted");
    self.route = target;
    Ok(())
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    let action = self.screen.handle_key(key, &self.services).await?;
    match action {
      Action::None => {}
      Action::Navigate(route) => self.navigate(route).await?,
      Action::Back => self.back().await?,
      Action::Logout(role) => {
        self
          .services
          .session
          .clear(role)
          .await
          .context("clearing session")?;
        info!(%role, "logged out");
        self.history.clear();
        self.mount(role.login_route()).await?;
      }
      Action::Quit => return Ok(false),
    }
    Ok(true)
  }
}

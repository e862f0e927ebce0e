//! Session state: who is logged in, persisted as flat string keys.
//!
//! A [`SessionStore`] is a dumb key/value store that survives restarts. The
//! typed [`Session`] is written into it field by field using the key layout
//! of its role ([`SessionKeys`]), and read back by [`SessionContext`], which
//! is the only surface screens use. Nothing here validates a session against
//! the server: presence of the role's critical keys means "logged in".

use std::{
  collections::HashMap,
  future::Future,
  sync::{Arc, Mutex, PoisonError},
};

use crate::{role::Role, route::Route};

// ─── Store trait ─────────────────────────────────────────────────────────────

/// Abstraction over a persisted key/value session store.
///
/// No expiry, no encryption, no locking across processes: concurrent writers
/// race with last-write-wins semantics.
pub trait SessionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  fn set<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn remove<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove every key, regardless of role.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── In-memory store ─────────────────────────────────────────────────────────

/// A process-local [`SessionStore`]. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
  entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
  pub fn new() -> Self { Self::default() }

  /// Snapshot of all keys currently held, sorted.
  pub fn keys(&self) -> Vec<String> {
    let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    let mut keys: Vec<String> = entries.keys().cloned().collect();
    keys.sort();
    keys
  }
}

impl SessionStore for MemorySessionStore {
  type Error = std::convert::Infallible;

  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a {
    let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    std::future::ready(Ok(entries.get(key).cloned()))
  }

  fn set<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.insert(key.to_owned(), value.to_owned());
    std::future::ready(Ok(()))
  }

  fn remove<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.remove(key);
    std::future::ready(Ok(()))
  }

  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_ {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.clear();
    std::future::ready(Ok(()))
  }
}

// ─── Key layout ──────────────────────────────────────────────────────────────

/// How a role's display name is spread over keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKeys {
  None,
  Single(&'static str),
  /// First and last name under separate keys; joined with a space on read.
  Split { first: &'static str, last: &'static str },
}

/// The persisted keys used by one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
  pub id:             &'static str,
  pub email:          Option<&'static str>,
  pub name:           NameKeys,
  pub token:          Option<&'static str>,
  /// Whether the email key is session-critical alongside the id.
  pub email_required: bool,
}

impl SessionKeys {
  pub fn for_role(role: Role) -> Self {
    match role {
      Role::Student => SessionKeys {
        id:             "student_id",
        email:          None,
        name:           NameKeys::Split { first: "first_name", last: "last_name" },
        token:          None,
        email_required: false,
      },
      Role::Organisation => SessionKeys {
        id:             "organisation_id",
        email:          Some("contact_email"),
        name:           NameKeys::Single("org_name"),
        token:          None,
        email_required: true,
      },
      Role::Supervisor => SessionKeys {
        id:             "supervisor_id",
        email:          Some("supervisor_email"),
        name:           NameKeys::None,
        token:          Some("supervisor_token"),
        email_required: true,
      },
      Role::Admin => SessionKeys {
        id:             "admin_id",
        email:          Some("admin_email"),
        name:           NameKeys::None,
        token:          None,
        email_required: true,
      },
    }
  }

  /// Every key this role may write.
  pub fn all(&self) -> Vec<&'static str> {
    let mut keys = vec![self.id];
    keys.extend(self.email);
    match self.name {
      NameKeys::None => {}
      NameKeys::Single(k) => keys.push(k),
      NameKeys::Split { first, last } => keys.extend([first, last]),
    }
    keys.extend(self.token);
    keys
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// A typed view of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
  pub role:         Role,
  pub id:           String,
  pub email:        Option<String>,
  pub display_name: Option<String>,
  pub token:        Option<String>,
}

impl Session {
  pub fn new(role: Role, id: impl Into<String>) -> Self {
    Self {
      role,
      id: id.into(),
      email: None,
      display_name: None,
      token: None,
    }
  }

  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
    self.display_name = Some(name.into());
    self
  }

  pub fn with_token(mut self, token: impl Into<String>) -> Self {
    self.token = Some(token.into());
    self
  }

  /// The fixed session the supervisor dashboard mounts with when the
  /// development bypass is switched on.
  pub fn dev_supervisor() -> Self {
    Session::new(Role::Supervisor, "dev_mock_id")
      .with_email("dev@example.com")
      .with_display_name("Dev User")
  }

  /// The `(key, value)` pairs this session persists as.
  pub fn entries(&self) -> Vec<(&'static str, String)> {
    let keys = SessionKeys::for_role(self.role);
    let mut out = vec![(keys.id, self.id.clone())];
    if let (Some(k), Some(v)) = (keys.email, &self.email) {
      out.push((k, v.clone()));
    }
    if let Some(name) = &self.display_name {
      match keys.name {
        NameKeys::None => {}
        NameKeys::Single(k) => out.push((k, name.clone())),
        NameKeys::Split { first, last } => {
          let (f, l) = name.split_once(' ').unwrap_or((name.as_str(), ""));
          out.push((first, f.to_owned()));
          out.push((last, l.trim().to_owned()));
        }
      }
    }
    if let (Some(k), Some(v)) = (keys.token, &self.token) {
      out.push((k, v.clone()));
    }
    out
  }
}

/// The outcome of a screen's mount-time session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mount {
  Granted(Session),
  Redirect(Route),
}

// ─── Context ─────────────────────────────────────────────────────────────────

/// The single set/get/clear surface screens use, injected into each of them.
///
/// Cheap to clone; the store is shared.
#[derive(Debug)]
pub struct SessionContext<S> {
  store:                 Arc<S>,
  supervisor_dev_bypass: bool,
}

impl<S> Clone for SessionContext<S> {
  fn clone(&self) -> Self {
    Self {
      store:                 Arc::clone(&self.store),
      supervisor_dev_bypass: self.supervisor_dev_bypass,
    }
  }
}

impl<S: SessionStore> SessionContext<S> {
  pub fn new(store: S) -> Self {
    Self { store: Arc::new(store), supervisor_dev_bypass: false }
  }

  /// Let the supervisor dashboard mount without a stored session.
  pub fn with_supervisor_dev_bypass(mut self, enabled: bool) -> Self {
    self.supervisor_dev_bypass = enabled;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  /// Persist every present field of `session` under its own key.
  pub async fn set(&self, session: &Session) -> Result<(), S::Error> {
    for (key, value) in session.entries() {
      self.store.set(key, &value).await?;
    }
    Ok(())
  }

  /// Read the session for `role`. `None` when any critical key is absent.
  pub async fn get(&self, role: Role) -> Result<Option<Session>, S::Error> {
    let keys = SessionKeys::for_role(role);
    let Some(id) = self.non_empty(keys.id).await? else {
      return Ok(None);
    };
    let email = match keys.email {
      Some(k) => self.non_empty(k).await?,
      None => None,
    };
    if keys.email_required && email.is_none() {
      return Ok(None);
    }
    let display_name = match keys.name {
      NameKeys::None => None,
      NameKeys::Single(k) => self.non_empty(k).await?,
      NameKeys::Split { first, last } => {
        let first = self.non_empty(first).await?.unwrap_or_default();
        let last = self.non_empty(last).await?.unwrap_or_default();
        let joined = format!("{first} {last}").trim().to_owned();
        (!joined.is_empty()).then_some(joined)
      }
    };
    let token = match keys.token {
      Some(k) => self.non_empty(k).await?,
      None => None,
    };
    Ok(Some(Session { role, id, email, display_name, token }))
  }

  /// Log `role` out. The student role wipes the whole store; the other roles
  /// remove only their own keys.
  pub async fn clear(&self, role: Role) -> Result<(), S::Error> {
    if role == Role::Student {
      return self.store.clear().await;
    }
    for key in SessionKeys::for_role(role).all() {
      self.store.remove(key).await?;
    }
    Ok(())
  }

  /// Overwrite the stored id of `role`, leaving the other keys alone.
  pub async fn remember_id(&self, role: Role, id: &str) -> Result<(), S::Error> {
    self.store.set(SessionKeys::for_role(role).id, id).await
  }

  /// The mount-time guard: grant the session or redirect to the login route.
  pub async fn require(&self, role: Role) -> Result<Mount, S::Error> {
    if role == Role::Supervisor && self.supervisor_dev_bypass {
      return Ok(Mount::Granted(Session::dev_supervisor()));
    }
    Ok(match self.get(role).await? {
      Some(session) => Mount::Granted(session),
      None => Mount::Redirect(role.login_route()),
    })
  }

  async fn non_empty(&self, key: &str) -> Result<Option<String>, S::Error> {
    Ok(self.store.get(key).await?.filter(|v| !v.is_empty()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ctx() -> SessionContext<MemorySessionStore> {
    SessionContext::new(MemorySessionStore::new())
  }

  #[tokio::test]
  async fn admin_session_writes_flat_keys() {
    let ctx = ctx();
    ctx
      .set(&Session::new(Role::Admin, "4").with_email("root@ub.ac.bw"))
      .await
      .unwrap();

    assert_eq!(ctx.store().keys(), vec!["admin_email", "admin_id"]);
    let session = ctx.get(Role::Admin).await.unwrap().unwrap();
    assert_eq!(session.id, "4");
    assert_eq!(session.email.as_deref(), Some("root@ub.ac.bw"));
  }

  #[tokio::test]
  async fn organisation_session_needs_contact_email() {
    let ctx = ctx();
    ctx.store().set("organisation_id", "9").await.unwrap();
    assert!(ctx.get(Role::Organisation).await.unwrap().is_none());

    ctx.store().set("contact_email", "hr@acme.co.bw").await.unwrap();
    let session = ctx.get(Role::Organisation).await.unwrap().unwrap();
    assert_eq!(session.id, "9");
  }

  #[tokio::test]
  async fn student_session_only_needs_the_id() {
    let ctx = ctx();
    ctx.store().set("student_id", "202100123").await.unwrap();
    let session = ctx.get(Role::Student).await.unwrap().unwrap();
    assert_eq!(session.display_name, None);

    ctx.store().set("first_name", "Neo").await.unwrap();
    ctx.store().set("last_name", "Kgosi").await.unwrap();
    let session = ctx.get(Role::Student).await.unwrap().unwrap();
    assert_eq!(session.display_name.as_deref(), Some("Neo Kgosi"));
  }

  #[tokio::test]
  async fn student_logout_clears_everything() {
    let ctx = ctx();
    ctx.set(&Session::new(Role::Student, "202100123")).await.unwrap();
    ctx
      .set(&Session::new(Role::Admin, "1").with_email("a@b.c"))
      .await
      .unwrap();

    ctx.clear(Role::Student).await.unwrap();
    assert!(ctx.store().keys().is_empty());
  }

  #[tokio::test]
  async fn other_roles_clear_only_their_keys() {
    let ctx = ctx();
    ctx.set(&Session::new(Role::Student, "202100123")).await.unwrap();
    ctx
      .set(
        &Session::new(Role::Organisation, "2")
          .with_email("hr@acme.co.bw")
          .with_display_name("Acme"),
      )
      .await
      .unwrap();

    ctx.clear(Role::Organisation).await.unwrap();
    assert_eq!(ctx.store().keys(), vec!["student_id"]);
  }

  #[tokio::test]
  async fn guard_redirects_student_to_login_after_clear() {
    let ctx = ctx();
    ctx.set(&Session::new(Role::Student, "202100123")).await.unwrap();
    assert!(matches!(ctx.require(Role::Student).await.unwrap(), Mount::Granted(_)));

    ctx.clear(Role::Student).await.unwrap();
    for path in ["/dashboard", "/submit-preference", "/edit-preference", "/logbook", "/edit-profile"] {
      let role = Route::parse(path).unwrap().guard().unwrap();
      assert_eq!(
        ctx.require(role).await.unwrap(),
        Mount::Redirect(Route::StudentLogin)
      );
    }
  }

  #[tokio::test]
  async fn supervisor_bypass_is_off_by_default() {
    let ctx = ctx();
    assert_eq!(
      ctx.require(Role::Supervisor).await.unwrap(),
      Mount::Redirect(Route::SupervisorLogin)
    );

    let ctx = ctx.with_supervisor_dev_bypass(true);
    assert_eq!(
      ctx.require(Role::Supervisor).await.unwrap(),
      Mount::Granted(Session::dev_supervisor())
    );
  }

  #[tokio::test]
  async fn empty_values_count_as_absent() {
    let ctx = ctx();
    ctx.store().set("student_id", "").await.unwrap();
    assert!(ctx.get(Role::Student).await.unwrap().is_none());
  }
}

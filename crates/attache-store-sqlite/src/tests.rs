//! Integration tests for `SqliteSessionStore`.

use attache_core::{
  role::Role,
  route::Route,
  session::{Mount, Session, SessionContext, SessionStore},
};

use crate::SqliteSessionStore;

async fn store() -> SqliteSessionStore {
  SqliteSessionStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Raw key/value ───────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_key_returns_none() {
  let s = store().await;
  assert_eq!(s.get("student_id").await.unwrap(), None);
}

#[tokio::test]
async fn set_overwrites_previous_value() {
  let s = store().await;
  s.set("organisation_id", "3").await.unwrap();
  s.set("organisation_id", "7").await.unwrap();
  assert_eq!(s.get("organisation_id").await.unwrap().as_deref(), Some("7"));
  assert_eq!(s.keys().await.unwrap(), vec!["organisation_id"]);
}

#[tokio::test]
async fn remove_and_clear() {
  let s = store().await;
  s.set("admin_id", "1").await.unwrap();
  s.set("admin_email", "ops@ub.ac.bw").await.unwrap();
  s.set("student_id", "202100123").await.unwrap();

  s.remove("admin_id").await.unwrap();
  assert_eq!(s.keys().await.unwrap(), vec!["admin_email", "student_id"]);

  s.clear().await.unwrap();
  assert!(s.keys().await.unwrap().is_empty());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("nested").join("session.db");

  {
    let ctx = SessionContext::new(SqliteSessionStore::open(&path).await.unwrap());
    let admin = Session::new(Role::Admin, "1").with_email("ops@ub.ac.bw");
    ctx.set(&admin).await.unwrap();
  }

  let ctx = SessionContext::new(SqliteSessionStore::open(&path).await.unwrap());
  let session = ctx.get(Role::Admin).await.unwrap().expect("admin session");
  assert_eq!(session.id, "1");
  assert_eq!(session.email.as_deref(), Some("ops@ub.ac.bw"));
}

#[tokio::test]
async fn student_logout_redirects_every_student_screen() {
  let ctx = SessionContext::new(store().await);
  ctx.set(&Session::new(Role::Student, "202100123")).await.unwrap();
  ctx
    .set(&Session::new(Role::Organisation, "3").with_email("hr@acme.co.bw"))
    .await
    .unwrap();

  ctx.clear(Role::Student).await.unwrap();

  assert!(ctx.store().keys().await.unwrap().is_empty());
  assert_eq!(ctx.require(Role::Student).await.unwrap(), Mount::Redirect(Route::StudentLogin));
}

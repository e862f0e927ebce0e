//! Async HTTP client wrapping the attachment-management JSON API.

use std::{sync::Arc, time::Duration};

use attache_core::{
  form::ErrorPayload,
  matching::MatchRequest,
  model::{
    AdminLoginResponse, LogbookRecord, LogbookSubmission, MatchResponse, MessageResponse,
    OrgIdLookup, Organisation, OrganisationLoginResponse, OrganisationPreference, Student,
    StudentPreference, SupervisorLoginResponse,
  },
  reference::{ReferenceList, ReferenceOption},
};
use reqwest::{
  Client, Method, RequestBuilder, Url,
  cookie::{CookieStore, Jar},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{ApiError, Result};

/// Name of the cookie the server sets for CSRF protection.
const CSRF_COOKIE: &str = "csrftoken";
const CSRF_HEADER: &str = "X-CSRFToken";

/// Connection settings for the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Server root, without the `/api` prefix.
  pub base_url: String,
  /// Per-request timeout. `None` waits indefinitely.
  pub timeout:  Option<Duration>,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self { base_url: "http://127.0.0.1:8000".into(), timeout: None }
  }
}

/// Async HTTP client for the attachment-management REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] and cookie jar are shared.
/// No request is ever retried.
#[derive(Clone)]
pub struct ApiClient {
  client:  Client,
  cookies: Arc<Jar>,
  config:  ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let cookies = Arc::new(Jar::default());
    let mut builder = Client::builder().cookie_provider(Arc::clone(&cookies));
    if let Some(timeout) = config.timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().map_err(ApiError::Build)?;
    Ok(Self { client, cookies, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// The value of the CSRF cookie for the API origin, if the server set one.
  pub fn csrf_token(&self) -> Option<String> {
    let url = Url::parse(&self.url("/")).ok()?;
    let header = self.cookies.cookies(&url)?;
    let header = header.to_str().ok()?;
    header.split(';').find_map(|pair| {
      let (name, value) = pair.trim().split_once('=')?;
      (name == CSRF_COOKIE).then(|| value.to_owned())
    })
  }

  // ── Plumbing ──────────────────────────────────────────────────────────────

  fn request(&self, method: &Method, path: &str) -> RequestBuilder {
    let url = self.url(path);
    debug!(%method, %url, "request");
    self.client.request(method.clone(), url)
  }

  /// Send `req` and return the raw body of a success response.
  async fn execute(&self, method: Method, path: &str, req: RequestBuilder) -> Result<Vec<u8>> {
    let verb = verb(&method);
    let transport = |source| ApiError::Transport { method: verb, path: path.to_owned(), source };

    let resp = req.send().await.map_err(transport)?;
    let status = resp.status();
    let body = resp.bytes().await.map_err(transport)?.to_vec();

    if !status.is_success() {
      let payload = serde_json::from_slice::<Value>(&body)
        .map(|v| ErrorPayload::from_json(&v))
        .unwrap_or(ErrorPayload::Empty);
      return Err(ApiError::Rejected {
        method: verb,
        path: path.to_owned(),
        status: status.as_u16(),
        payload,
      });
    }
    Ok(body)
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let req = self.request(&Method::GET, path);
    let body = self.execute(Method::GET, path, req).await?;
    decode(&Method::GET, path, &body)
  }

  async fn send_json<B, T>(&self, method: Method, path: &str, payload: &B) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let req = self.request(&method, path).json(payload);
    let body = self.execute(method.clone(), path, req).await?;
    decode(&method, path, &body)
  }

  /// Send `payload` and keep only an optional `message` from the response.
  async fn send_for_message<B>(&self, method: Method, path: &str, payload: &B) -> Result<Option<String>>
  where
    B: Serialize + ?Sized,
  {
    let req = self.request(&method, path).json(payload);
    let body = self.execute(method, path, req).await?;
    Ok(
      serde_json::from_slice::<MessageResponse>(&body)
        .ok()
        .and_then(|m| m.message),
    )
  }

  // ── Registration and login ────────────────────────────────────────────────

  /// `POST /api/register/student/`
  pub async fn register_student(&self, draft: &Value) -> Result<Option<String>> {
    self.send_for_message(Method::POST, "/register/student/", draft).await
  }

  /// `POST /api/login/student/`
  pub async fn login_student(&self, draft: &Value) -> Result<Option<String>> {
    self.send_for_message(Method::POST, "/login/student/", draft).await
  }

  /// `POST /api/register-organisation/`
  pub async fn register_organisation(&self, draft: &Value) -> Result<Option<String>> {
    self.send_for_message(Method::POST, "/register-organisation/", draft).await
  }

  /// `POST /api/login-organisation/`
  pub async fn login_organisation(&self, draft: &Value) -> Result<OrganisationLoginResponse> {
    self.send_json(Method::POST, "/login-organisation/", draft).await
  }

  /// `POST /api/register-supervisor/`
  pub async fn register_supervisor(&self, draft: &Value) -> Result<Option<String>> {
    self.send_for_message(Method::POST, "/register-supervisor/", draft).await
  }

  /// `POST /api/login-supervisor/`
  pub async fn login_supervisor(&self, draft: &Value) -> Result<SupervisorLoginResponse> {
    self.send_json(Method::POST, "/login-supervisor/", draft).await
  }

  /// `POST /api/admin/register/`
  pub async fn register_admin(&self, draft: &Value) -> Result<Option<String>> {
    self.send_for_message(Method::POST, "/admin/register/", draft).await
  }

  /// `POST /api/admin/login/`
  pub async fn login_admin(&self, draft: &Value) -> Result<AdminLoginResponse> {
    self.send_json(Method::POST, "/admin/login/", draft).await
  }

  // ── Reference lists ───────────────────────────────────────────────────────

  /// `GET /api/industries/` or `GET /api/skills/`
  pub async fn reference_list(&self, list: ReferenceList) -> Result<Vec<ReferenceOption>> {
    self.get_json(list.endpoint()).await
  }

  // ── Student preferences ───────────────────────────────────────────────────

  /// `POST /api/student-preference/`
  pub async fn create_student_preference(&self, body: &Value) -> Result<Option<String>> {
    self.send_for_message(Method::POST, "/student-preference/", body).await
  }

  /// `GET /api/student-preferences/`
  ///
  /// A single object is accepted and treated as a one-element list.
  pub async fn student_preferences(&self) -> Result<Vec<StudentPreference>> {
    let path = "/student-preferences/";
    let raw: Value = self.get_json(path).await?;
    let list = match raw {
      Value::Array(items) => Value::Array(items),
      other => Value::Array(vec![other]),
    };
    serde_json::from_value(list).map_err(|source| ApiError::Decode {
      method: "GET",
      path: path.to_owned(),
      source,
    })
  }

  /// `GET /api/admin/student-preferences/`
  pub async fn admin_student_preferences(&self) -> Result<Vec<StudentPreference>> {
    self.get_json("/admin/student-preferences/").await
  }

  /// `PUT /api/student-preference/{id}/`, carrying the CSRF token when the
  /// server has set one.
  pub async fn update_student_preference(&self, pref_id: &str, body: &Value) -> Result<Option<String>> {
    let path = format!("/student-preference/{pref_id}/");
    let mut req = self.request(&Method::PUT, &path).json(body);
    if let Some(token) = self.csrf_token() {
      req = req.header(CSRF_HEADER, token);
    }
    let body = self.execute(Method::PUT, &path, req).await?;
    Ok(
      serde_json::from_slice::<MessageResponse>(&body)
        .ok()
        .and_then(|m| m.message),
    )
  }

  // ── Organisation preferences ──────────────────────────────────────────────

  /// `POST /api/organisation/{org}/preferences/create/`
  pub async fn create_organisation_preference(&self, org_id: i64, body: &Value) -> Result<Option<String>> {
    let path = format!("/organisation/{org_id}/preferences/create/");
    self.send_for_message(Method::POST, &path, body).await
  }

  /// `GET /api/organisation/{org}/preferences/`
  pub async fn organisation_preferences(&self, org_id: &str) -> Result<Vec<OrganisationPreference>> {
    self.get_json(&format!("/organisation/{org_id}/preferences/")).await
  }

  /// `PUT /api/organisation-preference/{id}/`
  pub async fn update_organisation_preference(&self, pref_id: i64, body: &Value) -> Result<Option<String>> {
    let path = format!("/organisation-preference/{pref_id}/");
    self.send_for_message(Method::PUT, &path, body).await
  }

  // ── Logbooks ──────────────────────────────────────────────────────────────

  /// `GET /api/get-org-id-by-name/?name=..`
  pub async fn org_id_by_name(&self, name: &str) -> Result<OrgIdLookup> {
    let path = "/get-org-id-by-name/";
    let req = self.request(&Method::GET, path).query(&[("name", name)]);
    let body = self.execute(Method::GET, path, req).await?;
    decode(&Method::GET, path, &body)
  }

  /// `POST /api/logbook/`
  pub async fn submit_logbook(&self, entry: &LogbookSubmission) -> Result<Option<String>> {
    self.send_for_message(Method::POST, "/logbook/", entry).await
  }

  /// `GET /api/logbooks/{id}/`
  pub async fn logbook(&self, logbook_id: &str) -> Result<LogbookRecord> {
    self.get_json(&format!("/logbooks/{logbook_id}/")).await
  }

  /// `PUT /api/logbooks/{id}/mark-viewed/`
  pub async fn mark_logbook_viewed(&self, logbook_id: &str) -> Result<()> {
    let path = format!("/logbooks/{logbook_id}/mark-viewed/");
    let req = self.request(&Method::PUT, &path);
    self.execute(Method::PUT, &path, req).await?;
    Ok(())
  }

  /// `GET /api/organisation/{org}/logbooks/`
  pub async fn organisation_logbooks(&self, org_id: i64) -> Result<Vec<LogbookRecord>> {
    self.get_json(&format!("/organisation/{org_id}/logbooks/")).await
  }

  // ── Admin management ──────────────────────────────────────────────────────

  /// `GET /api/admin/students/`
  pub async fn admin_students(&self) -> Result<Vec<Student>> {
    self.get_json("/admin/students/").await
  }

  /// `PUT /api/admin/students/{id}/`
  pub async fn update_admin_student(&self, student_id: &str, body: &Value) -> Result<()> {
    let path = format!("/admin/students/{student_id}/");
    self.send_for_message(Method::PUT, &path, body).await.map(drop)
  }

  /// `DELETE /api/admin/students/{id}/`
  pub async fn delete_admin_student(&self, student_id: &str) -> Result<()> {
    let path = format!("/admin/students/{student_id}/");
    let req = self.request(&Method::DELETE, &path);
    self.execute(Method::DELETE, &path, req).await.map(drop)
  }

  /// `GET /api/admin/organisations/`
  pub async fn admin_organisations(&self) -> Result<Vec<Organisation>> {
    self.get_json("/admin/organisations/").await
  }

  /// `PUT /api/admin/organisations/{id}/`
  pub async fn update_admin_organisation(&self, org_id: i64, body: &Value) -> Result<()> {
    let path = format!("/admin/organisations/{org_id}/");
    self.send_for_message(Method::PUT, &path, body).await.map(drop)
  }

  /// `DELETE /api/admin/organisations/{id}/`
  pub async fn delete_admin_organisation(&self, org_id: i64) -> Result<()> {
    let path = format!("/admin/organisations/{org_id}/");
    let req = self.request(&Method::DELETE, &path);
    self.execute(Method::DELETE, &path, req).await.map(drop)
  }

  /// `POST /api/manual-match/`
  pub async fn manual_match(&self, request: &MatchRequest) -> Result<MatchResponse> {
    self.send_json(Method::POST, "/manual-match/", request).await
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  /// `GET /api/update_student_profile/{id}/`
  pub async fn student_profile(&self, student_id: &str) -> Result<Value> {
    self.get_json(&format!("/update_student_profile/{student_id}/")).await
  }

  /// `PUT /api/update_student_profile/{id}/`
  pub async fn update_student_profile(&self, student_id: &str, body: &Value) -> Result<Option<String>> {
    let path = format!("/update_student_profile/{student_id}/");
    self.send_for_message(Method::PUT, &path, body).await
  }

  /// `GET /api/update_organisation_profile/{id}/`
  pub async fn organisation_profile(&self, org_id: &str) -> Result<Value> {
    self.get_json(&format!("/update_organisation_profile/{org_id}/")).await
  }

  /// `PUT /api/update_organisation_profile/{id}/`
  pub async fn update_organisation_profile(&self, org_id: &str, body: &Value) -> Result<Option<String>> {
    let path = format!("/update_organisation_profile/{org_id}/");
    self.send_for_message(Method::PUT, &path, body).await
  }

  /// `POST /api/change-password/{id}/`
  pub async fn change_student_password(&self, student_id: &str, body: &Value) -> Result<Option<String>> {
    let path = format!("/change-password/{student_id}/");
    self.send_for_message(Method::POST, &path, body).await
  }

  /// `POST /api/change-organisation-password/{id}/`
  pub async fn change_organisation_password(&self, org_id: &str, body: &Value) -> Result<Option<String>> {
    let path = format!("/change-organisation-password/{org_id}/");
    self.send_for_message(Method::POST, &path, body).await
  }
}

fn verb(method: &Method) -> &'static str {
  match method.as_str() {
    "GET" => "GET",
    "POST" => "POST",
    "PUT" => "PUT",
    "DELETE" => "DELETE",
    _ => "HTTP",
  }
}

fn decode<T: DeserializeOwned>(method: &Method, path: &str, body: &[u8]) -> Result<T> {
  serde_json::from_slice(body).map_err(|source| ApiError::Decode {
    method: verb(method),
    path: path.to_owned(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use httpmock::prelude::*;
  use serde_json::json;

  use super::*;

  fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig { base_url: server.base_url(), timeout: None }).unwrap()
  }

  #[tokio::test]
  async fn admin_login_decodes_the_session_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
      when
        .method(POST)
        .path("/api/admin/login/")
        .json_body(json!({ "email": "ops@ub.ac.bw", "password": "pw" }));
      then
        .status(200)
        .json_body(json!({ "message": "Login successful", "admin_id": 1, "email": "ops@ub.ac.bw" }));
    });

    let resp = client(&server)
      .login_admin(&json!({ "email": "ops@ub.ac.bw", "password": "pw" }))
      .await
      .unwrap();
    mock.assert();
    assert_eq!(resp.admin_id, "1");
    assert_eq!(resp.email, "ops@ub.ac.bw");
  }

  #[tokio::test]
  async fn rejected_body_becomes_a_payload() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(POST).path("/api/register/student/");
      then
        .status(400)
        .json_body(json!({ "student_email": ["Enter a valid email address."] }));
    });

    let err = client(&server)
      .register_student(&json!({ "student_email": "nope" }))
      .await
      .unwrap_err();
    assert_eq!(err.status(), Some(400));
    let ErrorPayload::Fields(fields) = err.payload().unwrap() else {
      panic!("expected field errors, got {err:?}");
    };
    assert_eq!(fields["student_email"], "Enter a valid email address.");
  }

  #[tokio::test]
  async fn non_json_error_body_is_empty_payload() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(DELETE).path("/api/admin/students/202100123/");
      then.status(500).body("<html>Server Error</html>");
    });

    let err = client(&server)
      .delete_admin_student("202100123")
      .await
      .unwrap_err();
    assert_eq!(err.payload(), Some(&ErrorPayload::Empty));
    assert_eq!(err.message_or("Delete failed"), "Delete failed");
  }

  #[tokio::test]
  async fn connection_refused_is_a_transport_error() {
    let api = ApiClient::new(ApiConfig {
      base_url: "http://127.0.0.1:9".into(),
      timeout:  Some(Duration::from_secs(2)),
    })
    .unwrap();
    let err = api.reference_list(ReferenceList::Skills).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
    assert!(err.payload().is_none());
  }

  #[tokio::test]
  async fn single_preference_object_is_a_list_of_one() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/api/student-preferences/");
      then
        .status(200)
        .json_body(json!({ "student_pref_id": 4, "student": "202100123" }));
    });

    let prefs = client(&server).student_preferences().await.unwrap();
    assert_eq!(prefs.len(), 1);
    assert!(prefs[0].belongs_to("202100123"));
  }

  #[tokio::test]
  async fn preference_update_carries_the_csrf_cookie() {
    let server = MockServer::start();
    server.mock(|when, then| {
      when.method(GET).path("/api/skills/");
      then
        .status(200)
        .header("set-cookie", "csrftoken=tok123; Path=/")
        .json_body(json!([]));
    });
    let put = server.mock(|when, then| {
      when
        .method(PUT)
        .path("/api/student-preference/4/")
        .header("X-CSRFToken", "tok123");
      then.status(200).json_body(json!({}));
    });

    let api = client(&server);
    api.reference_list(ReferenceList::Skills).await.unwrap();
    assert_eq!(api.csrf_token().as_deref(), Some("tok123"));

    api
      .update_student_preference("4", &json!({ "pref_location": "Maun" }))
      .await
      .unwrap();
    put.assert();
  }

  #[tokio::test]
  async fn org_lookup_sends_the_name_as_a_query_parameter() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
      when
        .method(GET)
        .path("/api/get-org-id-by-name/")
        .query_param("name", "Debswana Mining");
      then.status(200).json_body(json!({ "org_id": 3 }));
    });

    let found = client(&server).org_id_by_name("Debswana Mining").await.unwrap();
    mock.assert();
    assert_eq!(found.org_id, 3);
  }
}

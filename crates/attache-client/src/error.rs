//! Error type for `attache-client`.

use attache_core::form::ErrorPayload;
use thiserror::Error;

/// Why a request did not produce the value a screen wanted.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The HTTP client could not be constructed.
  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  /// No response arrived (connection refused, timeout, ...).
  #[error("{method} {path} failed: {source}")]
  Transport {
    method: &'static str,
    path:   String,
    #[source]
    source: reqwest::Error,
  },

  /// The server answered with a non-success status.
  #[error("{method} {path} → {status}")]
  Rejected {
    method:  &'static str,
    path:    String,
    status:  u16,
    payload: ErrorPayload,
  },

  /// A success response whose body did not decode.
  #[error("decoding response of {method} {path}: {source}")]
  Decode {
    method: &'static str,
    path:   String,
    #[source]
    source: serde_json::Error,
  },
}

impl ApiError {
  /// The rejected body, when there was one. `None` means the screen should
  /// show its generic no-response message.
  pub fn payload(&self) -> Option<&ErrorPayload> {
    match self {
      ApiError::Rejected { payload, .. } => Some(payload),
      _ => None,
    }
  }

  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Rejected { status, .. } => Some(*status),
      _ => None,
    }
  }

  /// The server's flat message, or `fallback`.
  pub fn message_or(&self, fallback: &str) -> String {
    self
      .payload()
      .and_then(ErrorPayload::message)
      .unwrap_or(fallback)
      .to_owned()
  }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn message_or_prefers_the_server_message() {
    let rejected = ApiError::Rejected {
      method:  "POST",
      path:    "/manual-match/".into(),
      status:  400,
      payload: ErrorPayload::from_json(&json!({ "error": "Already matched" })),
    };
    assert_eq!(rejected.message_or("Match failed"), "Already matched");

    let fields = ApiError::Rejected {
      method:  "POST",
      path:    "/manual-match/".into(),
      status:  400,
      payload: ErrorPayload::from_json(&json!({ "student_pref_id": ["Required."] })),
    };
    assert_eq!(fields.message_or("Match failed"), "Match failed");
  }
}

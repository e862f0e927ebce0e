//! Error types for `attache-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("no screen is mounted at {0:?}")]
  UnknownRoute(String),

  #[error("invalid route parameter {name}: {value:?}")]
  InvalidRouteParam { name: &'static str, value: String },

  #[error("unknown form field: {0}")]
  UnknownField(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

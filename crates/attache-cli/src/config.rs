//! Runtime settings.
//!
//! Layered lowest to highest: built-in defaults, the optional TOML config
//! file, `ATTACHE_*` environment variables, then command-line flags.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::Context as _;
use attache_client::ApiConfig;
use serde::Deserialize;

/// Where the config file is looked for when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/attache/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Server root, without the `/api` prefix.
  pub api_url:               String,
  /// SQLite file holding the session keys.
  pub session_db:            PathBuf,
  /// Tracing output; the terminal itself is taken by the UI.
  pub log_file:              PathBuf,
  pub request_timeout_secs:  Option<u64>,
  /// Mount the supervisor dashboard with a fixed development session.
  pub supervisor_dev_bypass: bool,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      api_url:               "http://127.0.0.1:8000".into(),
      session_db:            PathBuf::from("~/.local/share/attache/session.db"),
      log_file:              PathBuf::from("attache.log"),
      request_timeout_secs:  None,
      supervisor_dev_bypass: false,
    }
  }
}

/// Values given on the command line; `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub api_url:    Option<String>,
  pub session_db: Option<PathBuf>,
  pub log_file:   Option<PathBuf>,
}

impl Settings {
  /// Read the config file and environment. An explicit `path` must exist;
  /// the default location is optional.
  pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
    let (file, required) = match path {
      Some(p) => (p.to_path_buf(), true),
      None => (expand_tilde(Path::new(DEFAULT_CONFIG_PATH)), false),
    };

    let settings: Settings = config::Config::builder()
      .add_source(config::File::from(file.as_path()).required(required))
      .add_source(config::Environment::with_prefix("ATTACHE"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?
      .try_deserialize()
      .context("invalid configuration")?;

    Ok(settings.expanded())
  }

  pub fn with_overrides(mut self, overrides: Overrides) -> Self {
    if let Some(url) = overrides.api_url {
      self.api_url = url;
    }
    if let Some(path) = overrides.session_db {
      self.session_db = path;
    }
    if let Some(path) = overrides.log_file {
      self.log_file = path;
    }
    self.expanded()
  }

  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      base_url: self.api_url.clone(),
      timeout:  self.request_timeout(),
    }
  }

  fn expanded(mut self) -> Self {
    self.session_db = expand_tilde(&self.session_db);
    self.log_file = expand_tilde(&self.log_file);
    self
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

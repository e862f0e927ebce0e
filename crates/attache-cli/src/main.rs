//! `attache`: terminal client for the industrial-attachment system.
//!
//! # Usage
//!
//! ```
//! attache --url http://127.0.0.1:8000
//! attache --config ~/.config/attache/config.toml /admin/dashboard
//! ```

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context as _, Result};
use attache_cli::{
  app::{App, Services},
  config::{Overrides, Settings},
  ui,
};
use attache_client::ApiClient;
use attache_core::{route::Route, session::SessionContext};
use attache_store_sqlite::SqliteSessionStore;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "attache", version, about = "Terminal client for industrial attachment management")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Server root of the API (default: http://127.0.0.1:8000).
  #[arg(long, env = "ATTACHE_URL")]
  url: Option<String>,

  /// SQLite file holding login sessions.
  #[arg(long, value_name = "FILE")]
  session_db: Option<PathBuf>,

  /// Where to write logs; the terminal belongs to the UI.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Route to open first, e.g. `/admin/dashboard`.
  route: Option<String>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let settings = Settings::load(args.config.as_deref())?.with_overrides(Overrides {
    api_url:    args.url,
    session_db: args.session_db,
    log_file:   args.log_file,
  });

  init_tracing(&settings)?;

  let start = match args.route.as_deref() {
    Some(path) => Route::parse(path).with_context(|| format!("unknown route {path}"))?,
    None => Route::Home,
  };

  let store = SqliteSessionStore::open(&settings.session_db)
    .await
    .with_context(|| format!("opening session store {}", settings.session_db.display()))?;
  let session =
    SessionContext::new(store).with_supervisor_dev_bypass(settings.supervisor_dev_bypass);
  let api = ApiClient::new(settings.api_config()).context("building HTTP client")?;
  let mut app = App::new(Services::new(api, session));
  info!(api = %settings.api_url, route = %start, "starting");

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = match app.navigate(start).await {
    Ok(()) => run_event_loop(&mut terminal, &mut app).await,
    Err(e) => Err(e),
  };

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// Log to the configured file; stdout is taken by the UI.
fn init_tracing(settings: &Settings) -> Result<()> {
  if let Some(parent) = settings.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("creating log directory {}", parent.display()))?;
  }
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(&settings.log_file)
    .with_context(|| format!("opening log file {}", settings.log_file.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<SqliteSessionStore>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}

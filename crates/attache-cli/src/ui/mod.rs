//! TUI rendering: header, the mounted screen, status bar.

pub mod dashboard;
pub mod form;
pub mod logbooks;
pub mod manage;
pub mod match_board;

use attache_core::form::{Notice, Tone};
use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
  app::App,
  screens::{
    Screen,
    home::{ENTRIES, HomeScreen},
    manage::ManageFocus,
    placeholder::PlaceholderScreen,
    profile::{ProfilePane, ProfileScreen},
  },
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S>(f: &mut Frame, app: &App<S>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    format!(" attache  {}", app.route),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.content.chars().count() as u16)
    .saturating_sub(right.content.chars().count() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  match &app.screen {
    Screen::Home(s) => draw_home(f, area, s),
    Screen::Form(s) => form::draw(f, area, s, true),
    Screen::Profile(s) => draw_profile(f, area, s),
    Screen::Dashboard(s) => dashboard::draw(f, area, s),
    Screen::Logbooks(s) => logbooks::draw_list(f, area, s),
    Screen::LogbookDetail(s) => logbooks::draw_detail(f, area, s),
    Screen::Manage(s) => manage::draw(f, area, s),
    Screen::Match(s) => match_board::draw(f, area, s),
    Screen::Placeholder(s) => draw_placeholder(f, area, s),
  }
}

fn draw_home(f: &mut Frame, area: Rect, home: &HomeScreen) {
  let block = pane(" Industrial Attachment ", true);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = ENTRIES
    .iter()
    .enumerate()
    .map(|(i, (label, _))| ListItem::new(format!(" {}  {label}", i + 1)))
    .collect();
  let mut state = ListState::default();
  state.select(Some(home.cursor));
  f.render_stateful_widget(List::new(items).highlight_style(cursor_style()), inner, &mut state);
}

fn draw_profile(f: &mut Frame, area: Rect, profile: &ProfileScreen) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area);
  form::draw(f, cols[0], &profile.details, profile.pane == ProfilePane::Details);
  form::draw(f, cols[1], &profile.password, profile.pane == ProfilePane::Password);
}

fn draw_placeholder(f: &mut Frame, area: Rect, screen: &PlaceholderScreen) {
  let block = pane(&format!(" {} ", screen.title), true);
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Span::styled(screen.body(), Style::default().fg(Color::DarkGray))),
    inner,
  );
}

// ─── Shared pieces ────────────────────────────────────────────────────────────

/// A bordered pane; unfocused panes get a dim border.
pub(crate) fn pane(title: &str, focused: bool) -> Block<'static> {
  let border = if focused { Color::Cyan } else { Color::DarkGray };
  Block::default()
    .title(title.to_owned())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border))
}

pub(crate) fn cursor_style() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

pub(crate) fn notice_line(notice: &Notice) -> Line<'static> {
  let color = match notice.tone {
    Tone::Info => Color::Cyan,
    Tone::Success => Color::Green,
    Tone::Error => Color::Red,
  };
  Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
}

/// Render an optional notice as a wrapped paragraph.
pub(crate) fn draw_notice(f: &mut Frame, area: Rect, notice: Option<&Notice>) {
  if let Some(notice) = notice {
    f.render_widget(Paragraph::new(notice_line(notice)).wrap(Wrap { trim: true }), area);
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn mode_and_hints(screen: &Screen) -> (&'static str, &'static str) {
  match screen {
    Screen::Home(_) => ("HOME", "↑↓ choose  Enter open  1-4 jump  q quit"),
    Screen::Form(s) if s.action.auth_switch().is_some() => {
      ("FORM", "Tab next field  ←→ choose  Enter submit  F2 switch  Esc back")
    }
    Screen::Form(_) => ("FORM", "Tab next field  ←→ choose  Ctrl-S submit  Esc back"),
    Screen::Profile(_) => ("PROFILE", "Tab next field  Ctrl-S save  F2 other form  Esc back"),
    Screen::Dashboard(_) => ("DASHBOARD", "←→ tabs  Enter open  l log out  q quit"),
    Screen::Logbooks(_) => ("LOGBOOKS", "↑↓/jk navigate  Enter open  v mark viewed  Esc back"),
    Screen::LogbookDetail(_) => ("LOGBOOK", "v mark viewed  Esc back  q quit"),
    Screen::Manage(s) => match s.focus {
      ManageFocus::Filter => ("SEARCH", "Type to filter  Esc clear  Enter done"),
      ManageFocus::ConfirmDelete => ("DELETE", "y confirm  any other key cancel"),
      ManageFocus::Form => ("EDIT", "Tab next field  Ctrl-S save  Esc list"),
      ManageFocus::List => ("MANAGE", "↑↓/jk navigate  / search  n new  e edit  d delete  Esc back"),
    },
    Screen::Match(_) => ("MATCH", "←→ column  Enter select  Space drag/drop  m match  Esc back"),
    Screen::Placeholder(_) => ("REPORTS", "Esc back  q quit"),
  }
}

fn draw_status<S>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = mode_and_hints(&app.screen);

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}

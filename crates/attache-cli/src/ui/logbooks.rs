//! Logbook inbox table and single-entry view.

use attache_core::model::{LogbookRecord, LogbookStatus};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Row, Table, TableState, Wrap},
};

use super::{cursor_style, draw_notice, pane};
use crate::screens::logbooks::{LogbookDetailScreen, LogbookListScreen};

fn status_span(status: LogbookStatus) -> Span<'static> {
  let color = match status {
    LogbookStatus::Pending => Color::Yellow,
    LogbookStatus::Viewed => Color::Green,
  };
  Span::styled(status.as_str(), Style::default().fg(color))
}

fn submitted(record: &LogbookRecord) -> String {
  record
    .submitted_at
    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
    .unwrap_or_default()
}

fn student(record: &LogbookRecord) -> &str {
  record.student_name.as_deref().unwrap_or(&record.student_id)
}

pub fn draw_list(f: &mut Frame, area: Rect, screen: &LogbookListScreen) {
  let block = pane(&format!(" Logbooks ({}) ", screen.logbooks.len()), true);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1)])
    .split(inner);

  if let Some(error) = &screen.error {
    f.render_widget(
      Paragraph::new(Span::styled(error.clone(), Style::default().fg(Color::Red))),
      rows[0],
    );
    return;
  }
  if screen.logbooks.is_empty() {
    f.render_widget(
      Paragraph::new(Span::styled(
        "No logbooks submitted yet.",
        Style::default().fg(Color::DarkGray),
      )),
      rows[0],
    );
    return;
  }

  let header = Row::new(["Week", "Student", "Submitted", "Status"])
    .style(Style::default().add_modifier(Modifier::BOLD));
  let body: Vec<Row> = screen
    .logbooks
    .iter()
    .map(|record| {
      Row::new(vec![
        Line::from(record.week_number.clone()),
        Line::from(student(record).to_owned()),
        Line::from(submitted(record)),
        Line::from(status_span(record.status)),
      ])
    })
    .collect();

  let table = Table::new(
    body,
    [
      Constraint::Length(6),
      Constraint::Percentage(40),
      Constraint::Length(18),
      Constraint::Length(8),
    ],
  )
  .header(header)
  .row_highlight_style(cursor_style());

  let mut state = TableState::default();
  state.select(Some(screen.cursor));
  f.render_stateful_widget(table, rows[0], &mut state);
  draw_notice(f, rows[1], screen.notice.as_ref());
}

pub fn draw_detail(f: &mut Frame, area: Rect, screen: &LogbookDetailScreen) {
  let block = pane(&format!(" Logbook {} ", screen.logbook_id), true);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(1)])
    .split(inner);

  let Some(record) = &screen.record else {
    let error = screen.error.clone().unwrap_or_default();
    f.render_widget(
      Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
      inner,
    );
    return;
  };

  let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
  let viewed = record
    .viewed_at
    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
    .unwrap_or_else(|| "-".into());
  let meta = vec![
    Line::from(vec![label("Student    "), Span::raw(student(record).to_owned())]),
    Line::from(vec![label("Week       "), Span::raw(record.week_number.clone())]),
    Line::from(vec![label("Submitted  "), Span::raw(submitted(record))]),
    Line::from(vec![label("Status     "), status_span(record.status)]),
    Line::from(vec![label("Viewed     "), Span::raw(viewed)]),
  ];
  f.render_widget(Paragraph::new(meta), rows[0]);
  f.render_widget(
    Paragraph::new(record.log_entry.clone()).wrap(Wrap { trim: false }),
    rows[1],
  );
  draw_notice(f, rows[2], screen.notice.as_ref());
}

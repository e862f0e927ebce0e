//! Admin management: table on the left, form on the right.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Span,
  widgets::{Paragraph, Row, Table, TableState},
};

use super::{cursor_style, draw_notice, form, pane};
use crate::screens::manage::{ManageFocus, ManageScreen};

pub fn draw(f: &mut Frame, area: Rect, screen: &ManageScreen) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
    .split(area);

  draw_table(f, cols[0], screen);
  form::draw(f, cols[1], &screen.form, screen.focus == ManageFocus::Form);
}

fn draw_table(f: &mut Frame, area: Rect, screen: &ManageScreen) {
  let visible = screen.visible();
  let list_focused = screen.focus != ManageFocus::Form;
  let block = pane(
    &format!(" {} ({}) ", screen.kind.title(), visible.len()),
    list_focused,
  );
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
    .split(inner);

  let header = Row::new(screen.headers()).style(Style::default().add_modifier(Modifier::BOLD));
  let body: Vec<Row> = visible.iter().map(|&i| Row::new(screen.cells(i))).collect();
  let table = Table::new(
    body,
    [
      Constraint::Length(10),
      Constraint::Percentage(30),
      Constraint::Length(12),
      Constraint::Percentage(30),
      Constraint::Length(12),
    ],
  )
  .header(header)
  .row_highlight_style(cursor_style());

  let mut state = TableState::default();
  state.select((!visible.is_empty()).then_some(screen.cursor));
  f.render_stateful_widget(table, rows[0], &mut state);

  let footer = match screen.focus {
    ManageFocus::Filter => Some((format!("/{}_", screen.filter), Color::Yellow)),
    ManageFocus::ConfirmDelete => Some(("Delete this record? [y/N]".to_owned(), Color::Red)),
    _ if !screen.filter.is_empty() => Some((format!("/{}", screen.filter), Color::Yellow)),
    _ => None,
  };
  if let Some((text, color)) = footer {
    f.render_widget(Paragraph::new(Span::styled(text, Style::default().fg(color))), rows[1]);
  }
  draw_notice(f, rows[2], screen.message.as_ref());
}

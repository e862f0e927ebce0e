//! Manual-match board: two source columns and the slots between them.

use attache_core::matching::DragItem;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{List, ListItem, ListState, Paragraph},
};

use super::{cursor_style, draw_notice, pane};
use crate::screens::match_board::{MatchColumn, MatchScreen};

pub fn draw(f: &mut Frame, area: Rect, screen: &MatchScreen) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(6)])
    .split(area);
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(rows[0]);

  let held = screen.held.as_ref();
  let students: Vec<ListItem> = screen
    .students
    .iter()
    .map(|p| {
      let picked = matches!(held, Some(DragItem::StudentPreference { student_pref_id })
        if *student_pref_id == p.student_pref_id);
      item(p.label().to_owned(), picked)
    })
    .collect();
  let organisations: Vec<ListItem> = screen
    .organisations
    .iter()
    .map(|o| {
      let picked = matches!(held, Some(DragItem::Organisation { org_id }) if *org_id == o.org_id);
      item(o.org_name.clone(), picked)
    })
    .collect();

  draw_column(f, cols[0], screen, MatchColumn::Students, " Student Preferences ", students);
  draw_column(f, cols[1], screen, MatchColumn::Organisations, " Organisations ", organisations);
  draw_board(f, rows[1], screen);
}

fn item(label: String, picked: bool) -> ListItem<'static> {
  if picked {
    ListItem::new(Line::from(vec![
      Span::styled("✋ ", Style::default().fg(Color::Yellow)),
      Span::styled(label, Style::default().fg(Color::Yellow)),
    ]))
  } else {
    ListItem::new(label)
  }
}

fn draw_column(
  f: &mut Frame,
  area: Rect,
  screen: &MatchScreen,
  column: MatchColumn,
  title: &str,
  items: Vec<ListItem<'static>>,
) {
  let focused = screen.column == column;
  let block = pane(title, focused);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut state = ListState::default();
  state.select((!items.is_empty() && focused).then(|| screen.cursor(column)));
  f.render_stateful_widget(List::new(items).highlight_style(cursor_style()), inner, &mut state);
}

fn draw_board(f: &mut Frame, area: Rect, screen: &MatchScreen) {
  let block = pane(" Match ", false);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(2), Constraint::Min(0)])
    .split(inner);

  let slot = |label: &'static str, value: Option<String>| {
    let (text, style) = match value {
      Some(v) => (v, Style::default().add_modifier(Modifier::BOLD)),
      None => ("(empty)".to_owned(), Style::default().fg(Color::DarkGray)),
    };
    Line::from(vec![
      Span::styled(label, Style::default().fg(Color::Gray)),
      Span::styled(text, style),
    ])
  };
  let lines = vec![
    slot("Student       ", screen.board.student.as_ref().map(|p| p.label().to_owned())),
    slot("Organisation  ", screen.board.organisation.as_ref().map(|o| o.org_name.clone())),
  ];
  f.render_widget(Paragraph::new(lines), rows[0]);
  draw_notice(f, rows[1], screen.message.as_ref());
}

//! Dashboard: greeting, tab row, tab content and its button.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Tabs, Wrap},
};

use super::pane;
use crate::screens::dashboard::DashboardScreen;

pub fn draw(f: &mut Frame, area: Rect, screen: &DashboardScreen) {
  let block = pane(&format!(" {} ", screen.greeting()), true);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2), // tabs
      Constraint::Min(0),    // content
      Constraint::Length(1), // button
    ])
    .split(inner);

  let tabs = Tabs::new(screen.tabs().iter().copied())
    .select(screen.tab)
    .style(Style::default().fg(Color::Gray))
    .highlight_style(
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    );
  f.render_widget(tabs, rows[0]);

  let mut lines = screen.lines().into_iter();
  let mut text = Vec::new();
  if let Some(heading) = lines.next() {
    text.push(Line::from(Span::styled(
      heading,
      Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push(Line::default());
  }
  text.extend(lines.map(Line::from));
  f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), rows[1]);

  if let Some((label, _)) = screen.button() {
    let button = Span::styled(
      format!(" [Enter] {label} "),
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    );
    f.render_widget(Paragraph::new(Line::from(button)), rows[2]);
  }
}

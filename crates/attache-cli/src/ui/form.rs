//! Form pane: one row per field, its error underneath, the notice at the
//! bottom.

use attache_core::forms::{FieldKind, Requirement};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use super::{draw_notice, pane};
use crate::screens::form::FormScreen;

const LABEL_WIDTH: usize = 24;

/// Render `screen` into `area`. `focused` dims the border and hides the
/// cursor when false.
pub fn draw(f: &mut Frame, area: Rect, screen: &FormScreen, focused: bool) {
  let block = pane(&format!(" {} ", screen.form.spec.title), focused);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(2)])
    .split(inner);

  let focused_field = focused.then(|| screen.focused()).flatten().map(|field| field.name);
  let mut lines = Vec::new();
  for field in screen.form.spec.fields {
    let is_focus = focused_field == Some(field.name);
    let required = match field.required {
      Requirement::Required => "*",
      Requirement::CreateOnly if !screen.form.editing => "*",
      _ => " ",
    };
    let label = format!("{required}{:<width$}", field.label, width = LABEL_WIDTH - 1);

    let label_style = if is_focus {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    let mut value_style = match field.kind {
      FieldKind::ReadOnly => Style::default().fg(Color::DarkGray),
      FieldKind::Select(_) if screen.form.value(field.name).is_empty() => {
        Style::default().fg(Color::DarkGray)
      }
      _ => Style::default(),
    };
    if is_focus {
      value_style = value_style.add_modifier(Modifier::UNDERLINED);
    }

    let mut value = screen.display_value(field);
    if let FieldKind::Select(_) = field.kind
      && is_focus
    {
      value = format!("‹ {value} ›");
    }

    // Multiline values continue under the label column.
    let mut parts = value.split('\n');
    let first = parts.next().unwrap_or_default().to_owned();
    lines.push(Line::from(vec![
      Span::styled(label, label_style),
      Span::styled(first, value_style),
    ]));
    for rest in parts {
      lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(rest.to_owned(), value_style),
      ]));
    }

    if let Some(error) = screen.form.errors.get(field.name) {
      lines.push(Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled(error.to_owned(), Style::default().fg(Color::Red)),
      ]));
    }
  }

  f.render_widget(Paragraph::new(lines), rows[0]);
  draw_notice(f, rows[1], screen.form.notice.as_ref());
}

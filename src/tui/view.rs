use crate::shared::{DisplayState, StatusKind};
use ratatui::layout::{Layout, Direction, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::grid;

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
   let sections = Layout::default()
       .direction(Direction::Vertical)
       .constraints([
           Constraint::Length(3), // catalog picker
           Constraint::Min(5), // progression strip
           Constraint::Length(3), // status line
       ])
       .split(area);

   draw_catalog(frame, sections[0], state);
   draw_progression(frame, sections[1], state);
   draw_status(frame, sections[2], state);
}

fn draw_catalog(frame: &mut Frame, area: Rect, state: &DisplayState) {
   let notes = state
       .catalog_notes
       .iter()
       .map(|n| n.to_string())
       .collect::<Vec<_>>()
       .join(" ");
   let line = Line::from(vec![
       Span::styled(state.catalog_name, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
       Span::raw(format!("  {}  [{}]", state.catalog_family, notes)),
   ]);
   let title = format!(" catalog {}/{} ", state.catalog_index + 1, state.catalog_len);
   let widget = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title));
   frame.render_widget(widget, area);
}

fn draw_progression(frame: &mut Frame, area: Rect, state: &DisplayState) {
   let title = format!(" progression: {} chords @ {:.2}s ", state.chords.len(), state.chord_seconds);
   let block = Block::default().borders(Borders::ALL).title(title);
   let inner = block.inner(area);
   frame.render_widget(block, area);

   if state.chords.is_empty() {
       let hint = Paragraph::new("(empty) press a for a random chord or enter for the catalog one")
           .style(Style::default().fg(Color::DarkGray));
       frame.render_widget(hint, inner);
       return;
   }
   grid::draw_chord_strip(frame, inner, state);
}

fn draw_status(frame: &mut Frame, area: Rect, state: &DisplayState) {
   let style = match state.status_kind {
       StatusKind::Info => Style::default(),
       StatusKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
   };
   let widget = Paragraph::new(state.status_text.as_str())
       .style(style)
       .block(Block::default().borders(Borders::ALL));
   frame.render_widget(widget, area);
}

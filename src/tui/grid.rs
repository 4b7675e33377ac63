use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::shared::DisplayState;

const CELL_WIDTH: u16 = 9;

// One bordered cell per chord, wrapping onto more rows when the strip fills up
pub fn draw_chord_strip(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let per_row = (area.width / CELL_WIDTH).max(1) as usize;
    let rows_needed = state.chords.len().div_ceil(per_row).max(1);
    let max_rows = (area.height / 3).max(1) as usize;
    // keep the selected (or playing) chord's row on screen
    let focus = state.playing.or(state.selected).unwrap_or(0);
    let first_row = (focus / per_row).saturating_sub(max_rows - 1).min(rows_needed.saturating_sub(1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); max_rows])
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); per_row])
            .split(*row_area);

        for (col_idx, cell_area) in cols.iter().enumerate() {
            let chord_idx = (first_row + row_idx) * per_row + col_idx;
            let Some(name) = state.chords.get(chord_idx) else {
                return;
            };
            let style = cell_style(state, chord_idx);
            let cell = Paragraph::new(*name)
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style));
            frame.render_widget(cell, *cell_area);
        }
    }
}

fn cell_style(state: &DisplayState, idx: usize) -> Style {
    if state.playing == Some(idx) {
        Style::default().fg(Color::LightMagenta).bg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else if state.selected == Some(idx) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    }
}

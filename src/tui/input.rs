use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crate::shared::InputEvent;

// poll for input from tui and resolve keys into semantic events for the middle layer
pub fn poll_input(timeout: Duration) -> anyhow::Result<Vec<InputEvent>> {
    if !event::poll(timeout)? {
        return Ok(vec![]);
    }

    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(vec![]);
        }
        return Ok(handle_key(key.code).into_iter().collect());
    }
    Ok(vec![])
}

// Keypresses that arrived while playback had the thread blocked are stale; drop them.
pub fn drain_pending() -> anyhow::Result<usize> {
    let mut dropped = 0;
    while event::poll(Duration::ZERO)? {
        event::read()?;
        dropped += 1;
    }
    Ok(dropped)
}

fn handle_key(code: KeyCode) -> Option<InputEvent> {
    let event = match code {
        KeyCode::Esc | KeyCode::Char('q') => InputEvent::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => InputEvent::PlayProgression,
        KeyCode::Char('a') => InputEvent::AddRandomChord,
        KeyCode::Char('c') => InputEvent::ClearProgression,
        KeyCode::Char('r') => InputEvent::RandomizeProgression,
        KeyCode::Enter => InputEvent::AddCatalogChord,
        KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => InputEvent::RemoveSelected,

        // cursors
        KeyCode::Up => InputEvent::CatalogPrev,
        KeyCode::Down => InputEvent::CatalogNext,
        KeyCode::Left => InputEvent::SelectPrev,
        KeyCode::Right => InputEvent::SelectNext,

        _ => return None,
    };
    Some(event)
}

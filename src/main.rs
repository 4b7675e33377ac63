mod shared;
mod tui;
mod audio_api;
mod audio;
mod middle;
mod pipeline;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use anyhow::Context;
use crossterm::terminal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use audio::CpalOutput;
use audio::playback::PlaybackDriver;
use middle::Middle;
use pipeline::settings::{self, Settings};
use shared::InputEvent;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let settings_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let settings = settings::load_settings(&settings_dir)
        .unwrap_or_default()
        .sanitized();
    init_logging(&settings_dir, &settings)?;
    tracing::info!(dir = %settings_dir.display(), ?settings, "starting chordtty");

    let driver = PlaybackDriver::new(
        CpalOutput { gain: settings.master_gain },
        settings.chord_duration(),
        settings.fade(),
    );
    let mut middle = Middle::new(settings, StdRng::from_entropy());

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let poll_timeout = Duration::from_millis(250); // nothing animates, just stay responsive

    loop {
        let ds = middle.display_state();
        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &ds);
        })?;

        let events = tui::input::poll_input(poll_timeout)?;
        for event in events {
            if event == InputEvent::Quit {
                // save before quitting
                if let Err(e) = settings::save_settings(&settings_dir, &middle.settings) {
                    tracing::warn!("could not save settings: {e}");
                }
                tracing::info!("bye");
                drop(term);
                return Ok(());
            }
            let Some(request) = middle.handle_input(event) else {
                continue;
            };

            // Playback blocks this thread; redraw between chords so the current one lights up
            tracing::info!(chords = request.chords.len(), "playing progression");
            let result = driver.play_progression(&request.chords, |idx, chord| {
                middle.on_chord_started(idx, chord);
                let ds = middle.display_state();
                if let Err(e) = term.draw(|frame| tui::view::render(frame, frame.area(), &ds)) {
                    tracing::warn!("redraw during playback failed: {e}");
                }
            });
            middle.on_playback_finished(result);
            let dropped = tui::input::drain_pending()?;
            if dropped > 0 {
                tracing::debug!(dropped, "discarded keys pressed during playback");
            }
        }
    }
}

// The TUI owns stdout, so logs go to <dir>/.chordtty/chordtty.log
fn init_logging(dir: &Path, settings: &Settings) -> anyhow::Result<()> {
    let path = settings::log_file_path(dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("could not open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("chordtty=info"));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .context("could not install log subscriber")?;
    Ok(())
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

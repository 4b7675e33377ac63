// Loaded on startup and written back on quit, so a fresh run leaves an editable file behind.
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const CHORDTTY_DIR: &str = ".chordtty";
const SETTINGS_FILE: &str = "settings.json";
const LOG_FILE: &str = "chordtty.log";

const MAX_CHORD_SECONDS: f32 = 60.0;
const MAX_RANDOMIZE_COUNT: usize = 64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chord_seconds: f32,
    pub randomize_count: usize,
    pub fade_ms: f32, // 0 = raw sine, no de-click ramp
    pub master_gain: f32,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chord_seconds: 1.0,
            randomize_count: 4,
            fade_ms: 0.0,
            master_gain: 1.0,
            log_filter: String::from("chordtty=info"),
        }
    }
}

impl Settings {
    /// Clamp hand-edited values back into something playable.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.chord_seconds.is_finite() || self.chord_seconds <= 0.0 {
            tracing::warn!(value = self.chord_seconds, "chord_seconds out of range, using default");
            self.chord_seconds = defaults.chord_seconds;
        }
        if self.chord_seconds > MAX_CHORD_SECONDS {
            tracing::warn!(value = self.chord_seconds, "chord_seconds too long, capping");
            self.chord_seconds = MAX_CHORD_SECONDS;
        }
        if self.randomize_count > MAX_RANDOMIZE_COUNT {
            tracing::warn!(value = self.randomize_count, "randomize_count too large, capping");
            self.randomize_count = MAX_RANDOMIZE_COUNT;
        }
        if !self.fade_ms.is_finite() || self.fade_ms < 0.0 {
            self.fade_ms = 0.0;
        }
        // a fade can't be longer than half the tone
        self.fade_ms = self.fade_ms.min(self.chord_seconds * 500.0);
        if !self.master_gain.is_finite() {
            self.master_gain = defaults.master_gain;
        }
        self.master_gain = self.master_gain.clamp(0.0, 1.0);
        self
    }

    pub fn chord_duration(&self) -> Duration {
        Duration::from_secs_f32(self.chord_seconds)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_secs_f32(self.fade_ms / 1000.0)
    }
}

// <dir>/.chordtty/settings.json
fn settings_file_path(dir: &Path) -> PathBuf {
    dir.join(CHORDTTY_DIR).join(SETTINGS_FILE)
}

// <dir>/.chordtty/chordtty.log
pub fn log_file_path(dir: &Path) -> PathBuf {
    dir.join(CHORDTTY_DIR).join(LOG_FILE)
}

pub fn load_settings(dir: &Path) -> Option<Settings> {
    let path = settings_file_path(dir);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

// Save the settings to disk, making the directory if it doesn't exist already
pub fn save_settings(dir: &Path, settings: &Settings) -> anyhow::Result<()> {
    let path = settings_file_path(dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?; // create .chordtty/ if needed
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, json)?;
    Ok(())
}

// Owns the progression and both cursors. Input events come in, state changes,
// and a play request goes out when the user asks for playback; main drives the
// actual (blocking) playback and reports back through `on_chord_started` and
// `on_playback_finished`.

use rand::Rng;
use rand::rngs::StdRng;

use crate::audio::PlaybackError;
use crate::pipeline::catalog::{self, CATALOG, Chord};
use crate::pipeline::progression::Progression;
use crate::pipeline::settings::Settings;
use crate::shared::{DisplayState, InputEvent, StatusKind};

pub struct Middle<R: Rng = StdRng> {
    pub progression: Progression,
    pub settings: Settings,
    rng: R,
    catalog_index: usize,
    selected: Option<usize>,
    playing: Option<usize>,
    status_text: String,
    status_kind: StatusKind,
}

// What main needs to run a progression; a snapshot so the middle stays free to update
#[derive(Clone, Debug)]
pub struct PlayRequest {
    pub chords: Vec<&'static Chord>,
}

impl<R: Rng> Middle<R> {
    pub fn new(settings: Settings, rng: R) -> Self {
        Self {
            progression: Progression::new(),
            settings,
            rng,
            catalog_index: 0,
            selected: None,
            playing: None,
            status_text: String::from("a: add random  enter: add  r: randomize  space: play  c: clear  esc: quit"),
            status_kind: StatusKind::Info,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) -> Option<PlayRequest> {
        match event {
            InputEvent::AddRandomChord => {
                let chord = catalog::random(&mut self.rng);
                self.add(chord);
            }
            InputEvent::AddCatalogChord => {
                let chord = &CATALOG[self.catalog_index];
                self.add(chord);
            }
            InputEvent::ClearProgression => {
                self.progression.clear();
                self.selected = None;
                self.info("progression cleared");
            }
            InputEvent::RandomizeProgression => {
                let count = self.settings.randomize_count;
                self.progression.randomize(count, &mut self.rng);
                self.selected = self.progression.len().checked_sub(1);
                self.info(format!("randomized {count} chords"));
            }
            InputEvent::RemoveSelected => {
                if let Some(chord) = self.selected.and_then(|idx| self.progression.remove(idx)) {
                    self.selected = match self.progression.len() {
                        0 => None,
                        len => self.selected.map(|idx| idx.min(len - 1)),
                    };
                    self.info(format!("removed {}", chord.name));
                }
            }
            InputEvent::CatalogPrev => {
                self.catalog_index = (self.catalog_index + CATALOG.len() - 1) % CATALOG.len();
            }
            InputEvent::CatalogNext => {
                self.catalog_index = (self.catalog_index + 1) % CATALOG.len();
            }
            InputEvent::SelectPrev => {
                self.selected = match self.selected {
                    Some(idx) => Some(idx.saturating_sub(1)),
                    None => self.progression.len().checked_sub(1),
                };
            }
            InputEvent::SelectNext => {
                if let Some(last) = self.progression.len().checked_sub(1) {
                    self.selected = Some(self.selected.map_or(0, |idx| (idx + 1).min(last)));
                }
            }
            InputEvent::PlayProgression => {
                if self.progression.is_empty() {
                    self.info("nothing to play");
                    return None;
                }
                self.info(format!("playing {} chords", self.progression.len()));
                return Some(PlayRequest {
                    chords: self.progression.chords().to_vec(),
                });
            }
            InputEvent::Quit => {}
        }
        None
    }

    pub fn on_chord_started(&mut self, idx: usize, chord: &Chord) {
        self.playing = Some(idx);
        self.info(format!("playing {} ({}/{})", chord.name, idx + 1, self.progression.len()));
    }

    pub fn on_playback_finished(&mut self, result: Result<(), PlaybackError>) {
        self.playing = None;
        match result {
            Ok(()) => self.info("done"),
            Err(e) => {
                tracing::error!("playback failed: {e}");
                self.status_text = format!("audio error: {e}");
                self.status_kind = StatusKind::Error;
            }
        }
    }

    pub fn display_state(&self) -> DisplayState {
        let entry = &CATALOG[self.catalog_index];
        DisplayState {
            chords: self.progression.names(),
            selected: self.selected,
            playing: self.playing,
            catalog_index: self.catalog_index,
            catalog_len: CATALOG.len(),
            catalog_name: entry.name,
            catalog_family: entry.family.label(),
            catalog_notes: entry.notes,
            chord_seconds: self.settings.chord_seconds,
            status_text: self.status_text.clone(),
            status_kind: self.status_kind,
        }
    }

    fn add(&mut self, chord: &'static Chord) {
        self.progression.add(chord);
        self.selected = Some(self.progression.len() - 1);
        tracing::debug!(chord = chord.name, len = self.progression.len(), "chord added");
        self.info(format!("added {}", chord.name));
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
        self.status_kind = StatusKind::Info;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn middle() -> Middle {
        Middle::new(Settings::default(), StdRng::seed_from_u64(9))
    }

    #[test]
    fn test_add_random_chord_appends_and_selects() {
        let mut m = middle();
        assert!(m.handle_input(InputEvent::AddRandomChord).is_none());
        assert!(m.handle_input(InputEvent::AddRandomChord).is_none());
        let ds = m.display_state();
        assert_eq!(ds.chords.len(), 2);
        assert_eq!(ds.selected, Some(1));
        assert!(ds.chords.iter().all(|name| catalog::find(name).is_some()));
        assert!(ds.status_text.starts_with("added "));
    }

    #[test]
    fn test_catalog_cursor_wraps_and_adds() {
        let mut m = middle();
        m.handle_input(InputEvent::CatalogPrev);
        assert_eq!(m.display_state().catalog_name, "Am13");
        m.handle_input(InputEvent::CatalogNext);
        m.handle_input(InputEvent::CatalogNext);
        let ds = m.display_state();
        assert_eq!(ds.catalog_name, "Dm");
        assert_eq!(ds.catalog_notes, &[62, 65, 69]);
        assert_eq!(ds.catalog_family, "triad");

        m.handle_input(InputEvent::AddCatalogChord);
        assert_eq!(m.progression.names(), vec!["Dm"]);
    }

    #[test]
    fn test_clear_resets_selection() {
        let mut m = middle();
        m.handle_input(InputEvent::AddRandomChord);
        m.handle_input(InputEvent::ClearProgression);
        let ds = m.display_state();
        assert!(ds.chords.is_empty());
        assert_eq!(ds.selected, None);
    }

    #[test]
    fn test_randomize_uses_configured_count() {
        let mut m = Middle::new(
            Settings { randomize_count: 6, ..Settings::default() },
            StdRng::seed_from_u64(1),
        );
        m.handle_input(InputEvent::AddCatalogChord);
        m.handle_input(InputEvent::RandomizeProgression);
        assert_eq!(m.progression.len(), 6);
        assert_eq!(m.display_state().selected, Some(5));
    }

    #[test]
    fn test_remove_selected_moves_cursor() {
        let mut m = middle();
        for _ in 0..3 {
            m.handle_input(InputEvent::AddCatalogChord);
            m.handle_input(InputEvent::CatalogNext);
        }
        // C Dm Em, cursor on Em
        m.handle_input(InputEvent::RemoveSelected);
        assert_eq!(m.progression.names(), vec!["C", "Dm"]);
        assert_eq!(m.display_state().selected, Some(1));

        m.handle_input(InputEvent::SelectPrev);
        m.handle_input(InputEvent::SelectPrev);
        assert_eq!(m.display_state().selected, Some(0));
        m.handle_input(InputEvent::RemoveSelected);
        assert_eq!(m.progression.names(), vec!["Dm"]);
        m.handle_input(InputEvent::RemoveSelected);
        assert!(m.progression.is_empty());
        assert_eq!(m.display_state().selected, None);

        // nothing selected, nothing removed
        m.handle_input(InputEvent::RemoveSelected);
        assert!(m.progression.is_empty());
    }

    #[test]
    fn test_select_next_clamps() {
        let mut m = middle();
        m.handle_input(InputEvent::SelectNext);
        assert_eq!(m.display_state().selected, None);
        m.handle_input(InputEvent::AddCatalogChord);
        m.handle_input(InputEvent::AddCatalogChord);
        m.handle_input(InputEvent::SelectNext);
        assert_eq!(m.display_state().selected, Some(1));
    }

    #[test]
    fn test_play_empty_is_noop() {
        let mut m = middle();
        assert!(m.handle_input(InputEvent::PlayProgression).is_none());
        assert_eq!(m.display_state().status_text, "nothing to play");
    }

    #[test]
    fn test_play_request_snapshots_progression() {
        let mut m = middle();
        m.handle_input(InputEvent::AddCatalogChord);
        m.handle_input(InputEvent::CatalogNext);
        m.handle_input(InputEvent::AddCatalogChord);
        let req = m.handle_input(InputEvent::PlayProgression).unwrap();
        let names: Vec<_> = req.chords.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["C", "Dm"]);

        m.on_chord_started(1, req.chords[1]);
        assert_eq!(m.display_state().playing, Some(1));
        m.on_playback_finished(Ok(()));
        assert_eq!(m.display_state().playing, None);
        assert_eq!(m.display_state().status_kind, StatusKind::Info);
    }

    #[test]
    fn test_audio_failure_is_surfaced() {
        let mut m = middle();
        m.on_playback_finished(Err(PlaybackError::NoDevice));
        let ds = m.display_state();
        assert_eq!(ds.status_kind, StatusKind::Error);
        assert_eq!(ds.status_text, "audio error: no default output device");
    }
}

//! Chord-at-a-time playback.
//!
//! Each chord acquires the output device, starts one looping sine per note,
//! holds for the chord's duration and releases the device again. A progression
//! is just those calls back to back, so two chords never overlap and an app
//! closed mid-progression never leaves a device open.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::tone::{self, SAMPLE_RATE};
use super::{AudioOutput, MAX_VOICES, PlaybackError};
use crate::pipeline::catalog::Chord;

pub struct PlaybackDriver<O: AudioOutput> {
    output: O,
    chord_duration: Duration,
    fade: Duration,
}

impl<O: AudioOutput> PlaybackDriver<O> {
    pub fn new(output: O, chord_duration: Duration, fade: Duration) -> Self {
        Self {
            output,
            chord_duration,
            fade,
        }
    }

    /// Sound `notes` together for the driver's chord duration. Blocks the caller.
    pub fn play_chord(&self, notes: &[u8]) -> Result<(), PlaybackError> {
        let mut session = self.output.open()?;

        let secs = self.chord_duration.as_secs_f64();
        let fade_frames = (self.fade.as_secs_f64() * SAMPLE_RATE as f64).round_ties_even() as usize;
        if notes.len() > MAX_VOICES {
            tracing::warn!(notes = notes.len(), "chord has more notes than voices, extra notes dropped");
        }
        let tones: Vec<_> = notes
            .iter()
            .map(|&note| {
                let mut wave = tone::synthesize(note, secs, SAMPLE_RATE);
                if fade_frames > 0 {
                    wave.apply_fade(fade_frames);
                }
                Arc::new(wave)
            })
            .collect();

        session.start(tones.clone())?;
        hold_for(self.chord_duration); // measured from the start, not from synthesis
        session.stop();
        drop(session);
        drop(tones); // the engine has let go of its clones by now

        Ok(())
    }

    /// Play every chord in order. `on_chord` runs right before each one starts.
    /// The first failure ends the progression.
    pub fn play_progression<F>(&self, chords: &[&'static Chord], mut on_chord: F) -> Result<(), PlaybackError>
    where
        F: FnMut(usize, &'static Chord),
    {
        for (idx, &chord) in chords.iter().enumerate() {
            on_chord(idx, chord);
            tracing::debug!(idx, chord = chord.name, notes = ?chord.notes, "playing chord");
            self.play_chord(chord.notes)?;
        }
        Ok(())
    }
}

// Monotonic deadline wait; sleep can wake early, so keep going until the deadline passes.
fn hold_for(duration: Duration) {
    let deadline = Instant::now() + duration;
    loop {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        std::thread::sleep(deadline - now);
    }
}

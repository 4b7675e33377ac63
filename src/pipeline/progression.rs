use rand::Rng;

use super::catalog::{self, Chord};

// Holds references into the catalog, never copies. Insertion order is playback order.
#[derive(Clone, Debug, Default)]
pub struct Progression {
    chords: Vec<&'static Chord>,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, chord: &'static Chord) {
        self.chords.push(chord);
    }

    /// Removes the chord at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<&'static Chord> {
        if index < self.chords.len() {
            Some(self.chords.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.chords.clear();
    }

    /// Replaces everything with `count` uniform catalog picks (repeats allowed).
    pub fn randomize<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.chords = (0..count).map(|_| catalog::random(rng)).collect();
    }

    pub fn chords(&self) -> &[&'static Chord] {
        &self.chords
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.chords.iter().map(|c| c.name).collect()
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }
}

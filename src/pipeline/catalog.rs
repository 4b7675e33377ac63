// The fixed chord table. Every note list is spelled out literally; nothing is
// derived from a root + quality formula, so what you see here is what plays.

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordFamily {
    Triad,
    SwappedTriad, // same roots as Triad, major/minor quality flipped
    MajorSeventh,
    MinorSeventh,
    Ninth,
    Thirteenth,
}

impl ChordFamily {
    pub fn label(self) -> &'static str {
        match self {
            ChordFamily::Triad => "triad",
            ChordFamily::SwappedTriad => "swapped triad",
            ChordFamily::MajorSeventh => "maj7",
            ChordFamily::MinorSeventh => "min7",
            ChordFamily::Ninth => "9th",
            ChordFamily::Thirteenth => "13th",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Chord {
    pub name: &'static str,
    pub notes: &'static [u8], // note numbers, 60 = middle C
    pub family: ChordFamily,
}

const fn chord(name: &'static str, family: ChordFamily, notes: &'static [u8]) -> Chord {
    Chord { name, notes, family }
}

use ChordFamily::*;

pub static CATALOG: [Chord; 36] = [
    chord("C", Triad, &[60, 64, 67]),
    chord("Dm", Triad, &[62, 65, 69]),
    chord("Em", Triad, &[64, 67, 71]),
    chord("F", Triad, &[65, 69, 72]),
    chord("G", Triad, &[67, 71, 74]),
    chord("Am", Triad, &[69, 72, 76]),

    chord("Cm", SwappedTriad, &[60, 63, 67]),
    chord("D", SwappedTriad, &[62, 66, 69]),
    chord("E", SwappedTriad, &[64, 68, 71]),
    chord("Fm", SwappedTriad, &[65, 68, 72]),
    chord("Gm", SwappedTriad, &[67, 70, 74]),
    chord("A", SwappedTriad, &[69, 73, 76]),

    chord("Cmaj7", MajorSeventh, &[60, 64, 67, 71]),
    chord("DmMaj7", MajorSeventh, &[62, 65, 69, 73]),
    chord("EmMaj7", MajorSeventh, &[64, 67, 71, 75]),
    chord("Fmaj7", MajorSeventh, &[65, 69, 72, 76]),
    chord("Gmaj7", MajorSeventh, &[67, 71, 74, 78]),
    chord("AmMaj7", MajorSeventh, &[69, 72, 76, 80]),

    chord("Cmin7", MinorSeventh, &[60, 63, 67, 70]),
    chord("Dm7", MinorSeventh, &[62, 65, 69, 72]),
    chord("Em7", MinorSeventh, &[64, 67, 71, 74]),
    chord("Fmin7", MinorSeventh, &[65, 68, 72, 75]),
    chord("Gmin7", MinorSeventh, &[67, 70, 74, 77]),
    chord("Am7", MinorSeventh, &[69, 72, 76, 79]),

    chord("C9", Ninth, &[60, 64, 67, 71, 74]),
    chord("Dm9", Ninth, &[62, 65, 69, 72, 76]),
    chord("Em9", Ninth, &[64, 67, 71, 74, 78]),
    chord("F9", Ninth, &[65, 69, 72, 76, 79]),
    chord("G9", Ninth, &[67, 71, 74, 78, 81]),
    chord("Am9", Ninth, &[69, 72, 76, 79, 83]),

    chord("C13", Thirteenth, &[60, 64, 67, 71, 74, 77, 81]),
    chord("Dm13", Thirteenth, &[62, 65, 69, 72, 76, 79, 83]),
    chord("Em13", Thirteenth, &[64, 67, 71, 74, 78, 81, 85]),
    chord("F13", Thirteenth, &[65, 69, 72, 76, 79, 83, 86]),
    chord("G13", Thirteenth, &[67, 71, 74, 78, 81, 85, 88]),
    chord("Am13", Thirteenth, &[69, 72, 76, 79, 83, 86, 90]),
];

/// Look a chord up by its exact (case-sensitive) name.
pub fn find(name: &str) -> Option<&'static Chord> {
    CATALOG.iter().find(|c| c.name == name)
}

#[cfg(test)]
pub fn notes(name: &str) -> Option<&'static [u8]> {
    find(name).map(|c| c.notes)
}

/// Uniform pick over the whole table.
pub fn random<R: Rng + ?Sized>(rng: &mut R) -> &'static Chord {
    &CATALOG[rng.gen_range(0..CATALOG.len())]
}

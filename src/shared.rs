// Keys:
//   a             //  AddRandomChord
//   c             //  ClearProgression
//   Space / p     //  PlayProgression
//   r             //  RandomizeProgression (settings.randomize_count chords)
//   Enter         //  AddCatalogChord (whatever the catalog cursor is on)
//   Up / Down     //  CatalogPrev / CatalogNext
//   Left / Right  //  SelectPrev / SelectNext in the progression
//   x / Del / Bksp//  RemoveSelected
//   Esc / q       //  Quit
//
// Only the middle layer holds state. The TUI renders whatever DisplayState it
// is handed each frame.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    AddRandomChord,
    AddCatalogChord,
    ClearProgression,
    PlayProgression,
    RandomizeProgression,
    RemoveSelected,

    CatalogPrev,
    CatalogNext,
    SelectPrev,
    SelectNext,

    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub chords: Vec<&'static str>, // progression, in playback order
    pub selected: Option<usize>,   // progression cursor
    pub playing: Option<usize>,    // chord currently sounding, if any
    pub catalog_index: usize,
    pub catalog_len: usize,
    pub catalog_name: &'static str,
    pub catalog_family: &'static str,
    pub catalog_notes: &'static [u8],
    pub chord_seconds: f32,
    pub status_text: String,
    pub status_kind: StatusKind,
}

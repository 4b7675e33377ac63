use std::sync::Arc;

pub use crate::audio::Waveform;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // Synthesis happens on the caller's thread; the engine only receives finished
    // buffers. Everything in one Start begins on the same audio block.
    Start(Vec<Arc<Waveform>>),

    // Silence every voice the engine is holding
    StopAll,
}

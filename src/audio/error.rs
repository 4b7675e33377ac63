//! Errors raised while acquiring or driving the audio output

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no default output device")]
    NoDevice,
    #[error("no default output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("unsupported sample format {0:?} (f32 and i16 only)")]
    UnsupportedFormat(cpal::SampleFormat),
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("audio engine stopped accepting commands")]
    Disconnected,
}

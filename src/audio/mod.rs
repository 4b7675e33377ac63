use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};

use crate::audio_api::AudioCommand;

mod engine;
mod error;
mod frame;
pub mod playback;
pub mod tone;
mod voice;

pub use error::PlaybackError;
pub use frame::StereoFrame;
pub use tone::Waveform;

pub use engine::MAX_VOICES;

use engine::Engine;

// Something that can hand out the output device for the length of one chord.
pub trait AudioOutput {
    fn open(&self) -> Result<Box<dyn OutputSession>, PlaybackError>;
}

// The device is held for as long as the session lives; dropping it releases the device.
pub trait OutputSession {
    fn start(&mut self, tones: Vec<Arc<Waveform>>) -> Result<(), PlaybackError>;
    fn stop(&mut self);
}

// The host's default output device through cpal
pub struct CpalOutput {
    pub gain: f32,
}

impl AudioOutput for CpalOutput {
    fn open(&self) -> Result<Box<dyn OutputSession>, PlaybackError> {
        Ok(Box::new(CpalSession::open(self.gain)?))
    }
}

struct CpalSession {
    tx: Sender<AudioCommand>,
    stream: cpal::Stream,
}

impl CpalSession {
    fn open(gain: f32) -> Result<Self, PlaybackError> {
        let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(64);

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(PlaybackError::NoDevice)?;
        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_output_stream::<f32>(&device, &config, rx, gain)?,
            cpal::SampleFormat::I16 => build_output_stream::<i16>(&device, &config, rx, gain)?,
            other => return Err(PlaybackError::UnsupportedFormat(other)),
        };
        stream.play()?;

        tracing::debug!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            ?sample_format,
            "output device acquired"
        );
        Ok(Self { tx, stream })
    }
}

impl OutputSession for CpalSession {
    fn start(&mut self, tones: Vec<Arc<Waveform>>) -> Result<(), PlaybackError> {
        self.tx
            .try_send(AudioCommand::Start(tones))
            .map_err(|_| PlaybackError::Disconnected)
    }

    fn stop(&mut self) {
        let _ = self.tx.try_send(AudioCommand::StopAll);
        if let Err(e) = self.stream.pause() {
            tracing::warn!("could not pause output stream: {e}");
        }
    }
}

impl Drop for CpalSession {
    fn drop(&mut self) {
        tracing::debug!("output device released");
    }
}

// ── Output stream ─────────────────────────────────────────────────

fn build_output_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    gain: f32,
) -> Result<cpal::Stream, PlaybackError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mut engine = Engine::new(config.sample_rate, gain);
    let mut mix = vec![StereoFrame::zero(); 4096]; // grown only if the host asks for a bigger block

    let err_fn = |err| tracing::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _info: &cpal::OutputCallbackInfo| {
            while let Ok(cmd) = rx.try_recv() { // set up command handling
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels.max(1);
            if mix.len() < n_frames {
                mix.resize(n_frames, StereoFrame::zero());
            }
            let block = &mut mix[..n_frames];
            engine.render_block(block);

            write_frames(data, channels, block);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// Interleave the stereo mix into the device buffer. Mono gets the average of
// both sides.
fn write_frames<T>(data: &mut [T], channels: usize, block: &[StereoFrame])
where
    T: SizedSample + FromSample<f32>,
{
    for (out, frame) in data.chunks_exact_mut(channels.max(1)).zip(block) {
        if out.len() == 1 {
            out[0] = T::from_sample(0.5 * (frame.left + frame.right));
            continue;
        }
        for (ch, sample) in out.iter_mut().enumerate() {
            let value = match ch {
                0 => frame.left,
                1 => frame.right,
                _ => 0.0, // surround channels stay silent
            };
            *sample = T::from_sample(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Vec<StereoFrame> {
        vec![
            StereoFrame { left: 0.5, right: -0.25 },
            StereoFrame { left: 1.0, right: 0.0 },
        ]
    }

    #[test]
    fn test_mono_averages_both_sides() {
        let mut data = [9.0_f32; 2];
        write_frames(&mut data, 1, &block());
        assert_eq!(data, [0.125, 0.5]);
    }

    #[test]
    fn test_stereo_interleaves() {
        let mut data = [9.0_f32; 4];
        write_frames(&mut data, 2, &block());
        assert_eq!(data, [0.5, -0.25, 1.0, 0.0]);
    }

    #[test]
    fn test_extra_channels_are_silent() {
        let mut data = [9.0_f32; 12];
        write_frames(&mut data, 6, &block());
        assert_eq!(data[..6], [0.5, -0.25, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(data[6..], [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_i16_output_spans_full_scale() {
        let loud = [
            StereoFrame { left: 1.0, right: -1.0 },
            StereoFrame::zero(),
        ];
        let mut data = [7_i16; 4];
        write_frames(&mut data, 2, &loud);
        assert_eq!(data[0], i16::MAX);
        assert!(data[1] <= -i16::MAX);
        assert_eq!(data[2..], [0, 0]);
    }

    #[test]
    fn test_short_block_leaves_rest_untouched() {
        let mut data = [9.0_f32; 6];
        write_frames(&mut data, 2, &block());
        assert_eq!(data[4..], [9.0, 9.0]);
    }
}

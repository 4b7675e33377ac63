use crate::audio_api::AudioCommand;

use super::frame::StereoFrame;
use super::voice::Voice;

// hard cap so we wont malloc in audio callback; the biggest catalog chord needs 7
pub const MAX_VOICES: usize = 8;

pub struct Engine {
    sample_rate: u32,
    gain: f32,
    voices: Vec<Voice>, // capacity reserved up front
}

impl Engine {
    pub fn new(sample_rate: u32, gain: f32) -> Self {
        Self {
            sample_rate,
            gain,
            voices: Vec::with_capacity(MAX_VOICES),
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Start(waves) => {
                for wave in waves {
                    if self.voices.len() == MAX_VOICES {
                        break; // extra notes are dropped, the driver warns about it
                    }
                    self.voices.push(Voice::new(wave, self.sample_rate, 1.0));
                }
            }
            AudioCommand::StopAll => self.voices.clear(),
        }
    }

    #[cfg(test)]
    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.active).count()
    }

    // Plain sum of every voice, no normalisation, clamped at full scale
    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());
        for v in &mut self.voices {
            v.render_into(out);
        }
        for f in out.iter_mut() {
            f.left = (f.left * self.gain).clamp(-1.0, 1.0);
            f.right = (f.right * self.gain).clamp(-1.0, 1.0);
        }
        self.voices.retain(|v| v.active);
    }
}

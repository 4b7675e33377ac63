use std::sync::Arc;

use super::frame::StereoFrame;
use super::tone::Waveform;

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

// One looping playback of a tone. The waveform is shared with the playback driver,
// so dropping a voice in the audio callback never frees the buffer there.
#[derive(Clone, Debug)]
pub struct Voice {
    pub pos: f64,
    pub rate: f64, // source frames advanced per output frame
    pub gain: f32,
    pub active: bool,
    wave: Arc<Waveform>,
}

impl Voice {
    pub fn new(wave: Arc<Waveform>, output_rate: u32, gain: f32) -> Self {
        let rate = if output_rate == 0 {
            1.0
        } else {
            wave.sample_rate as f64 / output_rate as f64
        };
        let active = !wave.is_empty();
        Self {
            pos: 0.0,
            rate,
            gain,
            active,
            wave,
        }
    }

    pub fn render_into(&mut self, out: &mut [StereoFrame]) {
        // mix this voice into the output block, wrapping at the end of the buffer
        if !self.active {
            return;
        }
        let len = self.wave.len();
        let data = &self.wave.data;
        if len == 0 {
            self.active = false;
            return;
        }

        for frame in out.iter_mut() {
            let i = self.pos as usize;
            let frac = (self.pos - i as f64) as f32;
            let s0 = data[i].to_stereo();
            let s1 = data[(i + 1) % len].to_stereo(); // loop seam reads from the start
            frame.left += lerp(s0.left, s1.left, frac) * self.gain;
            frame.right += lerp(s0.right, s1.right, frac) * self.gain;

            self.pos += self.rate;
            while self.pos >= len as f64 {
                self.pos -= len as f64;
            }
        }
    }
}

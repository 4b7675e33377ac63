use std::f64::consts::TAU;

use super::frame::PcmFrame;

pub const SAMPLE_RATE: u32 = 44_100;

// roughly half of 16-bit full scale
const PEAK: f64 = 0.5 * 32767.0;

/// Equal temperament, A4 (note 69) = 440 Hz.
pub fn note_to_freq(note: u8) -> f64 {
    440.0 * 2.0_f64.powf((note as f64 - 69.0) / 12.0)
}

#[derive(Clone, Debug)]
pub struct Waveform {
    pub sample_rate: u32,
    pub data: Vec<PcmFrame>, // both channels carry the same sample
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear ramp in and out over `fade_frames` at each end, to take the click off
    /// the start and stop. Capped at half the buffer.
    pub fn apply_fade(&mut self, fade_frames: usize) {
        let len = self.data.len();
        let n = fade_frames.min(len / 2);
        for i in 0..n {
            let gain = i as f32 / n as f32;
            for idx in [i, len - 1 - i] {
                let f = &mut self.data[idx];
                f.left = (f.left as f32 * gain) as i16;
                f.right = (f.right as f32 * gain) as i16;
            }
        }
    }
}

/// Sine tone for `note`, `duration_secs * sample_rate` frames long, halves rounded to even.
pub fn synthesize(note: u8, duration_secs: f64, sample_rate: u32) -> Waveform {
    let n_frames = if duration_secs.is_finite() && duration_secs > 0.0 {
        (duration_secs * sample_rate as f64).round_ties_even() as usize
    } else {
        0
    };
    let freq = note_to_freq(note);
    let rate = sample_rate as f64;

    let data = (0..n_frames)
        .map(|i| {
            let t = i as f64 / rate;
            // `as` truncates toward zero, same as a plain int16 cast
            PcmFrame::mono((PEAK * (TAU * freq * t).sin()) as i16)
        })
        .collect();

    Waveform { sample_rate, data }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rising_crossings(w: &Waveform) -> usize {
        w.data
            .windows(2)
            .filter(|pair| pair[0].left <= 0 && pair[1].left > 0)
            .count()
    }

    #[test]
    fn test_note_to_freq() {
        assert!((note_to_freq(69) - 440.0).abs() < 1e-9);
        assert!((note_to_freq(81) - 880.0).abs() < 1e-9);
        assert!((note_to_freq(60) - 261.6256).abs() < 1e-3);
    }

    #[test]
    fn test_a440_one_second() {
        let w = synthesize(69, 1.0, SAMPLE_RATE);
        assert_eq!(w.len(), 44_100);
        assert_eq!(w.sample_rate, SAMPLE_RATE);
        assert!(w.data.iter().all(|f| f.left == f.right));

        let crossings = rising_crossings(&w);
        assert!((439..=441).contains(&crossings), "got {crossings} crossings");
        let period = w.len() as f64 / crossings as f64;
        assert!((period - 100.23).abs() < 0.3, "period {period}");
    }

    #[test]
    fn test_peak_is_half_scale() {
        let w = synthesize(60, 0.25, SAMPLE_RATE);
        let peak = w.data.iter().map(|f| f.left.unsigned_abs()).max().unwrap();
        assert!((16_300..=16_383).contains(&peak), "peak {peak}");
    }

    #[test]
    fn test_frame_count_rounds() {
        assert_eq!(synthesize(60, 0.5, SAMPLE_RATE).len(), 22_050);
        assert_eq!(synthesize(60, 0.00001, SAMPLE_RATE).len(), 0); // 0.441 rounds down
        assert_eq!(synthesize(60, 0.00002, SAMPLE_RATE).len(), 1); // 0.882 rounds up
        assert_eq!(synthesize(60, 1.0, 8_000).len(), 8_000);
        // exact halves go to the even count
        assert_eq!(synthesize(60, 1.25, 2).len(), 2);
        assert_eq!(synthesize(60, 0.75, 2).len(), 2);
        assert_eq!(synthesize(60, 0.25, 2).len(), 0);
    }

    #[test]
    fn test_degenerate_durations_are_empty() {
        assert!(synthesize(60, 0.0, SAMPLE_RATE).is_empty());
        assert!(synthesize(60, -1.0, SAMPLE_RATE).is_empty());
        assert!(synthesize(60, f64::NAN, SAMPLE_RATE).is_empty());
    }

    #[test]
    fn test_fade_ramps_ends_only() {
        let raw = synthesize(69, 0.1, SAMPLE_RATE);
        let mut faded = raw.clone();
        faded.apply_fade(441);

        assert_eq!(faded.data[0], PcmFrame::mono(0));
        assert_eq!(*faded.data.last().unwrap(), PcmFrame::mono(0));
        // middle untouched
        let mid = raw.len() / 2;
        assert_eq!(faded.data[mid], raw.data[mid]);
        // early samples are quieter than the raw tone
        let early = |w: &Waveform| w.data[..100].iter().map(|f| f.left.unsigned_abs() as u32).sum::<u32>();
        assert!(early(&faded) < early(&raw));
    }

    #[test]
    fn test_fade_longer_than_buffer_is_capped() {
        let mut w = synthesize(69, 0.001, SAMPLE_RATE);
        w.apply_fade(10_000);
        assert_eq!(w.len(), 44);
        let mut empty = synthesize(69, 0.0, SAMPLE_RATE);
        empty.apply_fade(10);
        assert!(empty.is_empty());
    }
}

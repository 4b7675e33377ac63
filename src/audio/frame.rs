// The smallest unit of mixed audio; one stereo frame
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

impl StereoFrame {
    pub fn zero() -> Self { // just giving `default` a better name for clarity
        Self::default()
    }
}

// One frame of a synthesized tone, 16-bit signed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PcmFrame {
    pub left: i16,
    pub right: i16,
}

impl PcmFrame {
    pub fn mono(sample: i16) -> Self {
        Self { left: sample, right: sample }
    }

    pub fn to_stereo(self) -> StereoFrame {
        const SCALE: f32 = 1.0 / 32768.0;
        StereoFrame {
            left: self.left as f32 * SCALE,
            right: self.right as f32 * SCALE,
        }
    }
}

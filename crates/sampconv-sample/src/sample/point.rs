//! Stereo amplitude pair.

use std::ops::{Add, Mul};

/// Largest magnitude a 16-bit signed PCM value can hold.
pub const PCM16_MAX: i32 = 0x7FFF;

/// One stereo sample frame.
///
/// Channels are stored as `i32` so that intermediate math (amplification,
/// loop-seam blending) can exceed the 16-bit range before clipping is fixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SamplePoint {
    /// Left channel amplitude.
    pub left: i32,
    /// Right channel amplitude.
    pub right: i32,
}

impl SamplePoint {
    /// Silent point.
    pub const SILENCE: SamplePoint = SamplePoint { left: 0, right: 0 };

    /// Creates a point from both channels.
    pub const fn new(left: i32, right: i32) -> Self {
        Self { left, right }
    }

    /// Creates a point with the same value on both channels.
    pub const fn splat(mono: i32) -> Self {
        Self {
            left: mono,
            right: mono,
        }
    }

    /// Mono downmix, truncating toward zero.
    pub fn mono(&self) -> i32 {
        ((self.left as i64 + self.right as i64) / 2) as i32
    }

    /// Largest channel magnitude, saturating at `i32::MAX`.
    pub fn peak(&self) -> i32 {
        self.left.saturating_abs().max(self.right.saturating_abs())
    }

    /// Applies `f` to both channels.
    pub fn map(self, mut f: impl FnMut(i32) -> i32) -> Self {
        Self {
            left: f(self.left),
            right: f(self.right),
        }
    }
}

/// Rounds half-up: `floor(x + 0.5)`.
pub fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}

impl Mul<f64> for SamplePoint {
    type Output = SamplePoint;

    /// Scales both channels, rounding each half-up.
    fn mul(self, ratio: f64) -> SamplePoint {
        self.map(|v| round_half_up(ratio * v as f64))
    }
}

impl Add for SamplePoint {
    type Output = SamplePoint;

    /// Channel-wise sum, saturating at the `i32` range.
    fn add(self, other: SamplePoint) -> SamplePoint {
        SamplePoint {
            left: self.left.saturating_add(other.left),
            right: self.right.saturating_add(other.right),
        }
    }
}

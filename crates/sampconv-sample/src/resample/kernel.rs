//! Interpolation kernels.

use std::f64::consts::PI;
use std::fmt;

use crate::error::{SampleError, SampleResult};
use crate::sample::{round_half_up, SamplePoint};

/// Default tap count for the windowed sinc kernel.
pub const DEFAULT_SINC_WIDTH: usize = 16;

/// Interpolation strategy used when stepping through a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kernel {
    /// Picks the closer of the two neighbouring points.
    Nearest,
    /// Straight line between the two neighbouring points.
    Linear,
    /// Four-point Catmull-Rom spline.
    Cubic,
    /// Truncated sinc over `width` points.
    Sinc {
        /// Number of taps.
        width: usize,
    },
}

impl Kernel {
    /// Creates a sinc kernel, rejecting widths below two.
    pub fn sinc(width: usize) -> SampleResult<Self> {
        if width < 2 {
            return Err(SampleError::InvalidSincWidth { width });
        }
        Ok(Kernel::Sinc { width })
    }

    /// Returns the string identifier for this kernel.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kernel::Nearest => "nearest",
            Kernel::Linear => "linear",
            Kernel::Cubic => "cubic",
            Kernel::Sinc { .. } => "sinc",
        }
    }

    /// Relative positions read for each output point.
    pub fn taps(&self) -> Vec<isize> {
        match *self {
            Kernel::Nearest | Kernel::Linear => vec![0, 1],
            Kernel::Cubic => vec![-1, 0, 1, 2],
            Kernel::Sinc { width } => {
                let half = (width / 2) as isize;
                (-half..half).collect()
            }
        }
    }

    /// Computes one output point.
    ///
    /// `indexes[i]` is the absolute position of `taps[i]`, already clamped or
    /// wrapped to the end of `data`. Negative positions read the first point,
    /// except for sinc where they contribute nothing.
    pub fn interpolate(
        &self,
        data: &[SamplePoint],
        frac: f64,
        indexes: &[isize],
        taps: &[isize],
    ) -> SamplePoint {
        match *self {
            Kernel::Nearest => {
                let index = if frac < 0.5 { indexes[0] } else { indexes[1] };
                fetch(data, index)
            }
            Kernel::Linear => {
                let p0 = fetch(data, indexes[0]);
                let p1 = fetch(data, indexes[1]);
                let lerp = |a: i32, b: i32| round_half_up((1.0 - frac) * a as f64 + frac * b as f64);
                SamplePoint::new(lerp(p0.left, p1.left), lerp(p0.right, p1.right))
            }
            Kernel::Cubic => {
                let p = [
                    fetch(data, indexes[0]),
                    fetch(data, indexes[1]),
                    fetch(data, indexes[2]),
                    fetch(data, indexes[3]),
                ];
                let u = frac;
                let w = [
                    u * u * (2.0 - u) - u,
                    u * u * (3.0 * u - 5.0) + 2.0,
                    u * u * (4.0 - 3.0 * u) + u,
                    u * u * (u - 1.0),
                ];
                let spline = |c: [i32; 4]| {
                    let sum: f64 = w.iter().zip(c).map(|(w, v)| w * v as f64).sum();
                    round_half_up(sum / 2.0)
                };
                SamplePoint::new(
                    spline([p[0].left, p[1].left, p[2].left, p[3].left]),
                    spline([p[0].right, p[1].right, p[2].right, p[3].right]),
                )
            }
            Kernel::Sinc { .. } => {
                let mut left = 0.0;
                let mut right = 0.0;
                for (&index, &tap) in indexes.iter().zip(taps) {
                    if index < 0 {
                        continue;
                    }
                    let point = data[index as usize];
                    let weight = sinc(frac - tap as f64);
                    left += point.left as f64 * weight;
                    right += point.right as f64 * weight;
                }
                SamplePoint::new(round_half_up(left), round_half_up(right))
            }
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Kernel::Cubic
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kernel::Sinc { width } => write!(f, "sinc({})", width),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Normalized sinc: `sin(pi x) / (pi x)`, with `sinc(0) = 1`.
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

fn fetch(data: &[SamplePoint], index: isize) -> SamplePoint {
    data[index.max(0) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Vec<SamplePoint> {
        [0, 100, 200, 300, 400].iter().map(|&v| SamplePoint::splat(v)).collect()
    }

    #[test]
    fn test_taps() {
        assert_eq!(Kernel::Nearest.taps(), vec![0, 1]);
        assert_eq!(Kernel::Linear.taps(), vec![0, 1]);
        assert_eq!(Kernel::Cubic.taps(), vec![-1, 0, 1, 2]);
        assert_eq!(Kernel::Sinc { width: 4 }.taps(), vec![-2, -1, 0, 1]);
        assert_eq!(Kernel::Sinc { width: 16 }.taps().len(), 16);
    }

    #[test]
    fn test_sinc_width_validation() {
        assert!(Kernel::sinc(1).is_err());
        assert_eq!(Kernel::sinc(8).unwrap(), Kernel::Sinc { width: 8 });
    }

    #[test]
    fn test_nearest_switches_at_half() {
        let data = line();
        let k = Kernel::Nearest;
        let taps = k.taps();
        assert_eq!(k.interpolate(&data, 0.49, &[1, 2], &taps).left, 100);
        assert_eq!(k.interpolate(&data, 0.5, &[1, 2], &taps).left, 200);
    }

    #[test]
    fn test_linear_midpoint() {
        let data = line();
        let k = Kernel::Linear;
        let taps = k.taps();
        assert_eq!(k.interpolate(&data, 0.25, &[1, 2], &taps).left, 125);
        assert_eq!(k.interpolate(&data, 0.0, &[3, 4], &taps).left, 300);
    }

    #[test]
    fn test_cubic_is_exact_on_grid_and_lines() {
        let data = line();
        let k = Kernel::Cubic;
        let taps = k.taps();
        assert_eq!(k.interpolate(&data, 0.0, &[0, 1, 2, 3], &taps).left, 100);
        assert_eq!(k.interpolate(&data, 0.5, &[0, 1, 2, 3], &taps).left, 150);
    }

    #[test]
    fn test_negative_index_reads_first_point() {
        let data = line();
        let k = Kernel::Cubic;
        let taps = k.taps();
        let at_start = k.interpolate(&data, 0.0, &[-1, 0, 1, 2], &taps);
        assert_eq!(at_start.left, 0);
    }

    #[test]
    fn test_sinc_on_grid_reproduces_input() {
        let data = line();
        let k = Kernel::Sinc { width: 4 };
        let taps = k.taps();
        let out = k.interpolate(&data, 0.0, &[0, 1, 2, 3], &taps);
        assert_eq!(out.left, 200);
    }

    #[test]
    fn test_sinc_skips_negative_indexes() {
        let data = line();
        let k = Kernel::Sinc { width: 4 };
        let taps = k.taps();
        let out = k.interpolate(&data, 0.0, &[-2, -1, 0, 1], &taps);
        assert_eq!(out.left, 0);
    }

    #[test]
    fn test_sinc_function() {
        assert_eq!(sinc(0.0), 1.0);
        assert!(sinc(1.0).abs() < 1e-12);
        assert!((sinc(0.5) - 2.0 / PI).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(Kernel::Cubic.to_string(), "cubic");
        assert_eq!(Kernel::Sinc { width: 32 }.to_string(), "sinc(32)");
    }
}

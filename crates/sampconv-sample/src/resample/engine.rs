//! Length conversion: unlooped stepping and loop-aligned stepping.

use super::kernel::Kernel;
use crate::error::{SampleError, SampleResult};
use crate::sample::{Sample, SamplePoint, BLOCK_SAMPLES};

/// Converts samples to a new length with a chosen interpolation kernel.
///
/// Looped output always has a loop length that is a multiple of
/// [`BLOCK_SAMPLES`], a block-aligned loop start, and `loop_end == len()`.
/// Unlooped output is zero-padded at the end to a block multiple.
#[derive(Debug, Clone)]
pub struct Resampler {
    kernel: Kernel,
    taps: Vec<isize>,
}

impl Resampler {
    /// Creates a resampler for the given kernel.
    pub fn new(kernel: Kernel) -> Self {
        Self {
            taps: kernel.taps(),
            kernel,
        }
    }

    /// The interpolation kernel in use.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Resamples `sample` so that it lasts about `target_length` points.
    ///
    /// Trims and expands ping-pong loops first. For looped samples the final
    /// length may grow past `target_length` so the loop fits whole blocks.
    pub fn resample(&self, sample: Sample, target_length: f64) -> SampleResult<Sample> {
        if !target_length.is_finite() || target_length <= 0.0 {
            return Err(SampleError::invalid_target(target_length));
        }

        let sample = sample.trim().expand_ping_loop();
        let output = sample.metadata_clone();
        if sample.is_empty() {
            return Ok(output);
        }

        if !sample.looped || sample.loop_start() >= sample.loop_end() {
            Ok(self.resample_unlooped(&sample, output, target_length))
        } else {
            Ok(self.resample_looped(sample, output, target_length))
        }
    }

    fn resample_unlooped(&self, input: &Sample, mut output: Sample, target_length: f64) -> Sample {
        let len = input.len();
        let last = len as isize - 1;
        let multiplier = len as f64 / target_length;

        let mut indexes = Vec::with_capacity(self.taps.len());
        let mut stepper = 0.0;
        while stepper < len as f64 {
            let base = stepper.floor();
            indexes.clear();
            indexes.extend(self.taps.iter().map(|&tap| (tap + base as isize).min(last)));

            let point = self
                .kernel
                .interpolate(input.points(), stepper - base, &indexes, &self.taps);
            output.push(point);
            stepper += multiplier;
        }
        output.c5_speed = scale_speed(input.c5_speed, multiplier);

        while output.len() % BLOCK_SAMPLES != 0 {
            output.push(SamplePoint::SILENCE);
        }
        output
    }

    fn resample_looped(&self, input: Sample, mut output: Sample, target_length: f64) -> Sample {
        let plan = LoopPlan::new(
            input.len(),
            input.loop_start(),
            input.loop_end(),
            target_length,
        );
        let input = if plan.copies > 0 {
            input.repeat_loop_region(plan.copies)
        } else {
            input
        };

        let len = input.len() as isize;
        let loop_start = input.loop_start() as isize;
        let period = len - loop_start;

        let mut wrapped = Vec::with_capacity(self.taps.len());
        let mut seam = Vec::with_capacity(self.taps.len());
        let mut stepper = plan.offset;
        while stepper < len as f64 {
            let base = stepper.floor();
            let base_index = base as isize;
            wrapped.clear();
            seam.clear();

            for &tap in &self.taps {
                let mut index = tap + base_index;
                while index >= len {
                    index -= period;
                }
                wrapped.push(index);

                // Taps that reach back across the loop start while the
                // stepper is inside the loop read the loop tail instead.
                if base_index >= loop_start && index < loop_start {
                    seam.push(index + period);
                } else {
                    seam.push(index);
                }
            }

            let frac = stepper - base;
            let a = self
                .kernel
                .interpolate(input.points(), frac, &wrapped, &self.taps);
            let b = self
                .kernel
                .interpolate(input.points(), frac, &seam, &self.taps);
            output.push((a + b) * 0.5);
            stepper += plan.multiplier;
        }

        output.c5_speed = scale_speed(input.c5_speed, plan.multiplier);
        output.set_loop_end(plan.new_length.ceil() as usize);
        // Equal to ceil(loop_start / multiplier), computed from the integral
        // loop length so float noise cannot misalign it.
        let start = output.loop_end().saturating_sub(plan.loop_length);
        output.set_loop_start(start);

        output.trim().pad_left()
    }
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new(Kernel::default())
    }
}

/// Stepping parameters for a looped resample.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LoopPlan {
    /// Input points consumed per output point.
    pub multiplier: f64,
    /// Stepper start, zero or negative.
    pub offset: f64,
    /// Output length before edge trimming and padding.
    pub new_length: f64,
    /// Output loop length, a multiple of [`BLOCK_SAMPLES`].
    pub loop_length: usize,
    /// Extra copies of the input loop region to append before stepping.
    pub copies: usize,
}

impl LoopPlan {
    /// Chooses between stretching the whole sample and repeating the loop.
    ///
    /// Repeat wins when it is strictly shorter than stretch and actually
    /// changes the length. Otherwise stretch applies unless the loop is
    /// already aligned.
    pub(crate) fn new(len: usize, loop_start: usize, loop_end: usize, target_length: f64) -> Self {
        let len_f = len as f64;
        let mut new_length = target_length;
        let mut multiplier = len_f / new_length;
        let diff = (loop_end - loop_start) as f64 / multiplier;
        let mut offset = 0.0;

        if diff != diff.floor() {
            new_length *= diff.ceil() / diff;
            multiplier = len_f / new_length;
            offset = start_offset(new_length, multiplier);
        }

        let loop_length = diff.ceil() as usize;

        let mut stretch_loop_length = loop_length;
        let mut stretch_length = new_length;
        if loop_length % BLOCK_SAMPLES != 0 {
            stretch_loop_length = loop_length + BLOCK_SAMPLES - loop_length % BLOCK_SAMPLES;
            stretch_length *= stretch_loop_length as f64 / loop_length as f64;
        }

        let mut repeat_loop_length = loop_length;
        let mut repeat_length = new_length;
        let mut copies = 0;
        while repeat_loop_length % BLOCK_SAMPLES != 0 {
            repeat_loop_length += loop_length;
            repeat_length += loop_length as f64;
            copies += 1;
        }

        if repeat_length < stretch_length && repeat_length != new_length {
            Self {
                multiplier,
                offset: start_offset(new_length, multiplier),
                new_length: repeat_length,
                loop_length: repeat_loop_length,
                copies,
            }
        } else if stretch_length != new_length {
            let multiplier = len_f / stretch_length;
            Self {
                multiplier,
                offset: start_offset(stretch_length, multiplier),
                new_length: stretch_length,
                loop_length: stretch_loop_length,
                copies: 0,
            }
        } else {
            Self {
                multiplier,
                offset,
                new_length,
                loop_length,
                copies: 0,
            }
        }
    }
}

/// Shifts the stepper back so the fractional part of the length lands
/// before index 0.
fn start_offset(new_length: f64, multiplier: f64) -> f64 {
    (new_length.ceil() - new_length) * -multiplier
}

fn scale_speed(c5_speed: u32, multiplier: f64) -> u32 {
    (c5_speed as f64 / multiplier).round() as u32
}

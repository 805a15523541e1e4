//! sampconv sample model and resampling engine.
//!
//! This crate holds the PCM side of sampconv: the [`Sample`] buffer with its
//! loop metadata, the destructive lifecycle transforms applied before
//! encoding, and the [`Resampler`] that converts lengths while keeping loops
//! aligned to the codec's 16-sample blocks.
//!
//! # Example
//!
//! ```
//! use sampconv_sample::{Kernel, Resampler, Sample};
//!
//! let data: Vec<i32> = (0..40).map(|i| i * 100).collect();
//! let sample = Sample::from_mono("lead", &data, 8363).with_loop(20, 40, false);
//!
//! let out = Resampler::new(Kernel::Cubic).resample(sample, 40.0).unwrap();
//! assert_eq!(out.len() % 16, 0);
//! assert_eq!(out.loop_start() % 16, 0);
//! assert_eq!(out.loop_end(), out.len());
//! ```
//!
//! # Crate Structure
//!
//! - [`sample`] - [`Sample`] and [`SamplePoint`]
//! - [`resample`] - interpolation kernels and the stepping algorithms
//! - [`error`] - error types and the [`CodedError`] trait

pub mod error;
pub mod resample;
pub mod sample;

// Re-export main types at crate root
pub use error::{CodedError, SampleError, SampleResult};
pub use resample::{Kernel, Resampler, DEFAULT_SINC_WIDTH};
pub use sample::{Sample, SamplePoint, BLOCK_SAMPLES, PCM16_MAX};

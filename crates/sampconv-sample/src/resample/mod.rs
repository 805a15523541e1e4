//! Resampling engine.
//!
//! A [`Resampler`] pairs one interpolation [`Kernel`] with the shared stepping
//! logic. Two stepping algorithms exist:
//!
//! - **Unlooped** - steps from 0 by `len / target`, clamps taps to the last
//!   point and zero-pads the end to a block multiple.
//! - **Looped** - first plans an output loop length that is a multiple of
//!   16 (stretching the whole sample or repeating the loop, whichever is
//!   shorter), then steps with taps wrapped around the loop and blends the
//!   two readings at the loop seam. The result is trimmed at the loop end and
//!   left-padded so both loop edges fall on block boundaries.

mod engine;
mod kernel;


// Re-export public API
pub use engine::Resampler;
pub use kernel::{sinc, Kernel, DEFAULT_SINC_WIDTH};

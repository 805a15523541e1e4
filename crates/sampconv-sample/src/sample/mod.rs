//! Sample data model.
//!
//! A [`Sample`] owns its PCM points and forward-loop metadata. All lifecycle
//! transforms take the sample by value and hand back the transformed sample,
//! so no two views of one buffer can be alive at once.

mod buffer;
mod point;


// Re-export public API
pub use buffer::{Sample, BLOCK_SAMPLES};
pub use point::{round_half_up, SamplePoint, PCM16_MAX};

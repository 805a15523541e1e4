//! BRR finishing step for sampconv.
//!
//! Turns a prepared [`sampconv_sample::Sample`] into a finished BRR artifact:
//! block alignment (with a corrective resample when needed), clipping fix,
//! scratch WAV serialization, encoding through an external encoder, and the
//! loop-pointer header.
//!
//! # Example
//!
//! ```no_run
//! use sampconv_brr::{finish, EncoderConfig, FinishConfig, ProcessEncoder};
//! use sampconv_sample::Sample;
//!
//! let encoder = ProcessEncoder::new(EncoderConfig::default())?;
//! let sample = Sample::from_mono("kick", &[0; 64], 8363);
//! let finished = finish(sample, &FinishConfig::default(), &encoder)?;
//! std::fs::write("01 kick.brr", &finished.brr)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod encoder;
pub mod error;
pub mod finish;
pub mod patch;
pub mod size;
pub mod tuning;
pub mod wav;

pub use encoder::{
    find_encoder, poll_for_output, Encoder, EncoderConfig, EncoderFlavor, ProcessEncoder,
};
pub use error::{BrrError, BrrResult};
pub use finish::{align, finish, FinishConfig, FinishedSample};
pub use patch::{finish_block_stream, loop_pointer};
pub use size::{needs_initial_block, predict_size, BLOCK_BYTES};
pub use tuning::{output_filename, sanitize_name, tuning_line, tuning_value};

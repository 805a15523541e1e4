//! Impulse Tracker sample decoding for sampconv.
//!
//! Reads the sample table of an `.it` module and turns every occupied slot
//! into a [`sampconv_sample::Sample`]. Pattern and instrument data are never
//! parsed. Malformed input is reported as [`ItError::InvalidFile`]; nothing in
//! the loader indexes the input without a range check.
//!
//! [`ItModuleWriter`] writes the inverse: a minimal, pattern-less module used
//! to build test fixtures.
//!
//! # Example
//!
//! ```
//! use sampconv_it::{load_module, ItModuleWriter, ItSample};
//!
//! let mut writer = ItModuleWriter::new("demo");
//! writer.add_sample(ItSample::pcm16("kick", &[0, 1200, -800, 0], 8363));
//! let bytes = writer.to_bytes().unwrap();
//!
//! let module = load_module(&bytes).unwrap();
//! assert_eq!(module.samples[0].sample.len(), 4);
//! ```

pub mod error;
pub mod format;
pub mod loader;
pub mod writer;

pub use error::{ItError, ItResult};
pub use loader::{load_module, load_module_file, ItWarning, LoadedModule, LoadedSample, SampleHeader};
pub use writer::{ItModuleWriter, ItSample};

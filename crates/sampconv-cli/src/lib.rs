//! sampconv CLI library.
//!
//! Holds the argument parsers and the `convert` command so the pipeline can
//! be driven from tests with an in-memory encoder.

pub mod args;
pub mod commands;

pub use commands::convert::{convert_module, ConvertOptions, ConvertReport, ConvertedSample};

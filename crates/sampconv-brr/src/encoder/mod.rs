//! Encoder capability and the subprocess implementation.
//!
//! The finishing step only sees the [`Encoder`] trait. [`ProcessEncoder`]
//! runs an external BRR encoder on scratch files and polls for its output;
//! tests substitute an in-memory fake.

mod config;
mod process;

#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use config::{EncoderConfig, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS, ENCODER_ENV_VAR};
pub use process::{find_encoder, poll_for_output, ProcessEncoder};

use crate::error::BrrResult;

/// Turns a scratch WAV into a raw BRR block stream.
pub trait Encoder {
    /// Encodes `wav` with the loop starting at `loop_point` samples.
    ///
    /// `expected_len` is the predicted size of the block stream; an
    /// implementation may use it to decide when its output is complete.
    fn encode(&self, wav: &[u8], loop_point: usize, expected_len: usize) -> BrrResult<Vec<u8>>;
}

/// Command-line convention of a supported external encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderFlavor {
    /// `brr_encoder -l<loop> <wav> <brr>`. Prepends an initial block.
    #[default]
    BrrEncoder,
    /// `snesbrr -e <wav> <brr> -l <loop>`. Never prepends.
    Snesbrr,
}

impl EncoderFlavor {
    /// Returns the string identifier for this flavor.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncoderFlavor::BrrEncoder => "brr-encoder",
            EncoderFlavor::Snesbrr => "snesbrr",
        }
    }

    /// Executable names looked up on `PATH`.
    pub fn executable_names(&self) -> &'static [&'static str] {
        match (self, cfg!(windows)) {
            (EncoderFlavor::BrrEncoder, true) => &["brr_encoder.exe", "brr_encoder"],
            (EncoderFlavor::BrrEncoder, false) => &["brr_encoder"],
            (EncoderFlavor::Snesbrr, true) => &["snesbrr.exe", "snesbrr"],
            (EncoderFlavor::Snesbrr, false) => &["snesbrr"],
        }
    }

    /// Whether this encoder emits an extra block before a non-silent start.
    pub fn prepends_initial_block(&self) -> bool {
        matches!(self, EncoderFlavor::BrrEncoder)
    }

    /// Arguments for one invocation.
    pub fn args(&self, wav: &Path, brr: &Path, loop_point: usize) -> Vec<OsString> {
        match self {
            EncoderFlavor::BrrEncoder => vec![
                format!("-l{}", loop_point).into(),
                wav.into(),
                brr.into(),
            ],
            EncoderFlavor::Snesbrr => vec![
                "-e".into(),
                wav.into(),
                brr.into(),
                "-l".into(),
                loop_point.to_string().into(),
            ],
        }
    }
}

impl fmt::Display for EncoderFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncoderFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brr-encoder" | "brr_encoder" => Ok(EncoderFlavor::BrrEncoder),
            "snesbrr" => Ok(EncoderFlavor::Snesbrr),
            other => Err(format!(
                "unknown encoder flavor '{}', expected 'brr-encoder' or 'snesbrr'",
                other
            )),
        }
    }
}

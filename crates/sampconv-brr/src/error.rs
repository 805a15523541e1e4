//! Error types for the BRR finishing step.

use std::path::PathBuf;

use sampconv_sample::{CodedError, SampleError};
use thiserror::Error;

/// Result type for BRR operations.
pub type BrrResult<T> = Result<T, BrrError>;

/// Errors that can occur while finishing a sample.
#[derive(Debug, Error)]
pub enum BrrError {
    /// No encoder executable could be located.
    #[error("BRR encoder not found (looked for {searched}). Pass --encoder or set SAMPCONV_ENCODER")]
    EncoderNotFound {
        /// What was searched, for the message.
        searched: String,
    },

    /// Failed to spawn the encoder process.
    #[error("failed to spawn encoder {}: {source}", program.display())]
    SpawnFailed {
        /// Encoder executable.
        program: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Encoder exited with non-zero status and left no usable output.
    #[error("encoder exited with status {exit_code}: {stderr}")]
    ProcessFailed {
        /// Exit code, `-1` when killed by a signal.
        exit_code: i32,
        /// Captured stderr.
        stderr: String,
    },

    /// Encoder output never reached the predicted size.
    #[error(
        "encoder output {} missing or too small after {attempts} attempts: expected at least {expected} bytes, found {found}",
        path.display()
    )]
    OutputNotReady {
        /// Output path that was polled.
        path: PathBuf,
        /// Predicted size in bytes.
        expected: usize,
        /// Size of the last observed file, 0 when absent.
        found: u64,
        /// Number of polls made.
        attempts: u32,
    },

    /// PCM handed to the encoder is not block aligned.
    #[error("sample is not block aligned: length {length}, loop start {loop_start}")]
    Misaligned {
        /// Sample length.
        length: usize,
        /// Loop start.
        loop_start: usize,
    },

    /// Loop pointer does not fit the 16-bit header.
    #[error("loop pointer {pointer} does not fit in 16 bits")]
    LoopPointerOverflow {
        /// Computed pointer in bytes.
        pointer: usize,
    },

    /// Corrective resample failed.
    #[error(transparent)]
    Sample(#[from] SampleError),

    /// Scratch file I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrrError {
    /// Creates a process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }
}

impl CodedError for BrrError {
    fn code(&self) -> &'static str {
        match self {
            BrrError::EncoderNotFound { .. } => "BRR_001",
            BrrError::SpawnFailed { .. } => "BRR_002",
            BrrError::ProcessFailed { .. } => "BRR_003",
            BrrError::OutputNotReady { .. } => "BRR_004",
            BrrError::Misaligned { .. } => "BRR_005",
            BrrError::LoopPointerOverflow { .. } => "BRR_006",
            BrrError::Io(_) => "BRR_007",
            BrrError::Sample(err) => err.code(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            BrrError::Sample(err) => err.category(),
            _ => "brr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            BrrError::EncoderNotFound {
                searched: "brr_encoder".into(),
            },
            BrrError::process_failed(2, "bad wav"),
            BrrError::OutputNotReady {
                path: PathBuf::from("out.brr"),
                expected: 18,
                found: 0,
                attempts: 5,
            },
            BrrError::Misaligned {
                length: 17,
                loop_start: 0,
            },
            BrrError::LoopPointerOverflow { pointer: 70000 },
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(errors.iter().all(|e| e.category() == "brr"));
    }

    #[test]
    fn test_sample_error_keeps_its_code() {
        let err = BrrError::from(SampleError::invalid_target(0.0));
        assert_eq!(err.code(), "SAMPLE_001");
        assert_eq!(err.category(), "sample");
    }

    #[test]
    fn test_output_not_ready_display() {
        let err = BrrError::OutputNotReady {
            path: PathBuf::from("tmp/01.brr"),
            expected: 27,
            found: 9,
            attempts: 5,
        };
        assert_eq!(
            err.to_string(),
            "encoder output tmp/01.brr missing or too small after 5 attempts: expected at least 27 bytes, found 9"
        );
    }
}

//! Error types for IT decoding.

use std::fmt;
use std::path::PathBuf;

use sampconv_sample::CodedError;
use thiserror::Error;

/// Result type for IT operations.
pub type ItResult<T> = Result<T, ItError>;

/// Errors that can occur while decoding an IT module.
#[derive(Debug, Error)]
pub enum ItError {
    /// Malformed header, offset or length.
    #[error("invalid IT file{}: {message}", OffsetSuffix(.offset))]
    InvalidFile {
        /// What was wrong.
        message: String,
        /// Byte offset of the bad field, if known.
        offset: Option<usize>,
    },

    /// A sample uses a feature that cannot be converted.
    #[error("sample {index}: unsupported feature: {feature}")]
    UnsupportedFeature {
        /// 1-based sample index.
        index: usize,
        /// Feature name.
        feature: String,
    },

    /// Module file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl ItError {
    /// Creates an invalid file error without an offset.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidFile {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates an invalid file error at a byte offset.
    pub fn at_offset(message: impl Into<String>, offset: usize) -> Self {
        Self::InvalidFile {
            message: message.into(),
            offset: Some(offset),
        }
    }

    /// Creates an unsupported feature error.
    pub fn unsupported(index: usize, feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            index,
            feature: feature.into(),
        }
    }
}

impl CodedError for ItError {
    fn code(&self) -> &'static str {
        match self {
            ItError::InvalidFile { .. } => "IT_001",
            ItError::UnsupportedFeature { .. } => "IT_002",
            ItError::Io { .. } => "IT_003",
        }
    }

    fn category(&self) -> &'static str {
        "it"
    }
}

struct OffsetSuffix<'a>(&'a Option<usize>);

impl fmt::Display for OffsetSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            Some(offset) => write!(f, " at offset 0x{:04X}", offset),
            None => Ok(()),
        }
    }
}

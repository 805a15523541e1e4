//! Error types shared by the sampconv crates.

use thiserror::Error;

/// Common trait for errors surfaced to the user.
///
/// Every sampconv crate implements this for its error enum so the CLI can
/// report a stable code next to the message.
///
/// # Example
///
/// ```ignore
/// use sampconv_sample::CodedError;
///
/// fn report<E: CodedError>(err: &E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait CodedError: std::error::Error {
    /// Stable error code such as `"SAMPLE_001"` or `"BRR_003"`.
    fn code(&self) -> &'static str;

    /// Human-readable message, by default the `Display` output.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category: `"sample"`, `"it"` or `"brr"`.
    fn category(&self) -> &'static str;
}

/// Result type for sample operations.
pub type SampleResult<T> = Result<T, SampleError>;

/// Errors that can occur while transforming samples.
#[derive(Debug, Error)]
pub enum SampleError {
    /// Resample target length must be positive and finite.
    #[error("invalid resample target length: {target}")]
    InvalidTargetLength {
        /// The rejected target length.
        target: f64,
    },

    /// Windowed sinc kernel needs at least two taps.
    #[error("invalid sinc width {width}: must be at least 2")]
    InvalidSincWidth {
        /// The rejected width.
        width: usize,
    },
}

impl SampleError {
    /// Creates an invalid target length error.
    pub fn invalid_target(target: f64) -> Self {
        Self::InvalidTargetLength { target }
    }
}

impl CodedError for SampleError {
    fn code(&self) -> &'static str {
        match self {
            SampleError::InvalidTargetLength { .. } => "SAMPLE_001",
            SampleError::InvalidSincWidth { .. } => "SAMPLE_002",
        }
    }

    fn category(&self) -> &'static str {
        "sample"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_target_display() {
        let err = SampleError::invalid_target(-3.0);
        assert!(err.to_string().contains("-3"));
        assert_eq!(err.code(), "SAMPLE_001");
        assert_eq!(err.category(), "sample");
    }

    #[test]
    fn test_sinc_width_display() {
        let err = SampleError::InvalidSincWidth { width: 3 };
        assert!(err.message().contains("at least 2"));
        assert_eq!(err.code(), "SAMPLE_002");
    }
}

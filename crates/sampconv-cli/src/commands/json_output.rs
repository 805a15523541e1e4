//! JSON output types for the `--json` flag.

use serde::{Deserialize, Serialize};

use crate::commands::convert::ConvertedSample;
use sampconv_it::ItWarning;

/// Error codes raised by the CLI itself. Library errors pass their own codes through.
pub mod error_codes {
    /// Output directory or file could not be written
    pub const OUTPUT_WRITE: &str = "CLI_001";
    /// Invalid command-line value
    pub const INVALID_ARGUMENT: &str = "CLI_002";
    /// Any other failure
    pub const UNKNOWN: &str = "CLI_099";
}

/// Warning codes.
pub mod warning_codes {
    /// Stereo sample downmixed
    pub const STEREO_DOWNMIXED: &str = "IT_W001";
    /// Sustain loop ignored
    pub const SUSTAIN_LOOP_IGNORED: &str = "IT_W002";
    /// Loop bounds clamped to the data
    pub const LOOP_CLAMPED: &str = "IT_W003";
    /// Clipping corrected before encoding
    pub const CLIPPING_CORRECTED: &str = "BRR_W001";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "IT_001", "BRR_004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "IT_W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// 1-based sample index the warning refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample: Option<usize>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            sample: None,
        }
    }

    /// Sets the sample index for this warning.
    pub fn with_sample(mut self, index: usize) -> Self {
        self.sample = Some(index);
        self
    }
}

/// Converts a loader warning to JSON.
pub fn it_warning_to_json(warning: &ItWarning) -> JsonWarning {
    let code = match warning {
        ItWarning::StereoDownmixed { .. } => warning_codes::STEREO_DOWNMIXED,
        ItWarning::SustainLoopIgnored { .. } => warning_codes::SUSTAIN_LOOP_IGNORED,
        ItWarning::LoopClamped { .. } => warning_codes::LOOP_CLAMPED,
    };
    JsonWarning::new(code, warning.to_string()).with_sample(warning.index())
}

/// Warning for a sample whose clipping was corrected.
pub fn clipping_warning(index: usize, peak: i32) -> JsonWarning {
    JsonWarning::new(
        warning_codes::CLIPPING_CORRECTED,
        format!("sample {} clipped at peak {}, scaled down", index, peak),
    )
    .with_sample(index)
}

/// JSON output for the `convert` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertOutput {
    /// Whether every selected sample converted
    pub success: bool,
    /// Input module path
    pub module: String,
    /// Folder the artifacts were written to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
    /// Converted samples in table order
    pub samples: Vec<ConvertedSample>,
    /// Warnings from loading and finishing
    pub warnings: Vec<JsonWarning>,
    /// Errors (at most one; the run stops at the first)
    pub errors: Vec<JsonError>,
}

impl ConvertOutput {
    /// Creates a successful output.
    pub fn success(
        module: String,
        out_dir: String,
        samples: Vec<ConvertedSample>,
        warnings: Vec<JsonWarning>,
    ) -> Self {
        Self {
            success: true,
            module,
            out_dir: Some(out_dir),
            samples,
            warnings,
            errors: Vec::new(),
        }
    }

    /// Creates a failed output, keeping whatever was converted before the error.
    pub fn failure(
        module: String,
        out_dir: Option<String>,
        samples: Vec<ConvertedSample>,
        warnings: Vec<JsonWarning>,
        error: JsonError,
    ) -> Self {
        Self {
            success: false,
            module,
            out_dir,
            samples,
            warnings,
            errors: vec![error],
        }
    }
}

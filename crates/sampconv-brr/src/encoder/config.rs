//! Encoder configuration.

use std::path::PathBuf;
use std::time::Duration;

use super::EncoderFlavor;

/// Environment variable naming the encoder executable.
pub const ENCODER_ENV_VAR: &str = "SAMPCONV_ENCODER";

/// Default number of output polls.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 5;

/// Default pause between output polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 16;

/// Configuration for the subprocess encoder.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Path to the encoder executable.
    pub program: Option<PathBuf>,
    /// Command-line convention.
    pub flavor: EncoderFlavor,
    /// Directory for scratch files. The system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
    /// Number of times the output file is checked.
    pub poll_attempts: u32,
    /// Pause between checks.
    pub poll_interval: Duration,
    /// Pass 0 as the loop argument regardless of the sample's loop.
    pub force_loop_zero: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: None,
            flavor: EncoderFlavor::default(),
            scratch_dir: None,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            force_loop_zero: false,
        }
    }
}

impl EncoderConfig {
    /// Creates a config for the given flavor.
    pub fn with_flavor(flavor: EncoderFlavor) -> Self {
        Self {
            flavor,
            ..Default::default()
        }
    }

    /// Sets the encoder executable path.
    pub fn program(mut self, path: impl Into<PathBuf>) -> Self {
        self.program = Some(path.into());
        self
    }

    /// Sets the scratch directory.
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Sets the poll budget.
    pub fn poll(mut self, attempts: u32, interval: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_interval = interval;
        self
    }

    /// Forces the encoder's loop argument to 0.
    pub fn force_loop_zero(mut self, force: bool) -> Self {
        self.force_loop_zero = force;
        self
    }
}

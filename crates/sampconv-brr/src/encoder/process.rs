//! Subprocess encoder.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use super::config::{EncoderConfig, ENCODER_ENV_VAR};
use super::{Encoder, EncoderFlavor};
use crate::error::{BrrError, BrrResult};

/// Runs an external encoder per sample on scratch files.
#[derive(Debug, Clone)]
pub struct ProcessEncoder {
    config: EncoderConfig,
    program: PathBuf,
}

impl ProcessEncoder {
    /// Locates the encoder executable and creates the encoder.
    pub fn new(config: EncoderConfig) -> BrrResult<Self> {
        let env = std::env::var_os(ENCODER_ENV_VAR);
        let program = find_encoder(config.program.as_deref(), env, config.flavor)?;
        Ok(Self { config, program })
    }

    /// The resolved encoder executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn scratch_dir(&self) -> BrrResult<tempfile::TempDir> {
        let builder = {
            let mut builder = tempfile::Builder::new();
            builder.prefix("sampconv_");
            builder
        };
        let dir = match self.config.scratch_dir {
            Some(ref parent) => {
                std::fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };
        Ok(dir)
    }
}

impl Encoder for ProcessEncoder {
    fn encode(&self, wav: &[u8], loop_point: usize, expected_len: usize) -> BrrResult<Vec<u8>> {
        let scratch = self.scratch_dir()?;
        let wav_path = scratch.path().join("sample.wav");
        let brr_path = scratch.path().join("sample.brr");
        std::fs::write(&wav_path, wav)?;

        let loop_arg = if self.config.force_loop_zero {
            0
        } else {
            loop_point
        };

        let output = Command::new(&self.program)
            .args(self.config.flavor.args(&wav_path, &brr_path, loop_arg))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| BrrError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        match poll_for_output(
            &brr_path,
            expected_len,
            self.config.poll_attempts,
            self.config.poll_interval,
        ) {
            Ok(blocks) => Ok(blocks),
            Err(_) if !output.status.success() => Err(BrrError::process_failed(
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            )),
            Err(err) => Err(err),
        }
    }
}

/// Locates the encoder executable.
///
/// Order: `explicit`, then `env` (the value of `SAMPCONV_ENCODER`), then the
/// flavor's executable names on `PATH`. Bare names in the first two are
/// resolved through `PATH` as well.
pub fn find_encoder(
    explicit: Option<&Path>,
    env: Option<OsString>,
    flavor: EncoderFlavor,
) -> BrrResult<PathBuf> {
    let mut searched = Vec::new();

    let overrides = explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(env.map(PathBuf::from));
    for candidate in overrides {
        if candidate.is_file() {
            return Ok(candidate);
        }
        if let Ok(path) = which::which(&candidate) {
            return Ok(path);
        }
        searched.push(candidate.display().to_string());
    }

    for name in flavor.executable_names() {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
        searched.push(name.to_string());
    }

    Err(BrrError::EncoderNotFound {
        searched: searched.join(", "),
    })
}

/// Waits for `path` to hold at least `expected` bytes and returns its contents.
///
/// Checks up to `attempts` times (at least once), sleeping `interval` after
/// each miss. Exhausting the budget is [`BrrError::OutputNotReady`].
pub fn poll_for_output(
    path: &Path,
    expected: usize,
    attempts: u32,
    interval: Duration,
) -> BrrResult<Vec<u8>> {
    let attempts = attempts.max(1);
    let mut found = 0;

    for attempt in 0..attempts {
        if let Ok(meta) = std::fs::metadata(path) {
            found = meta.len();
            if meta.is_file() && found >= expected as u64 {
                return Ok(std::fs::read(path)?);
            }
        }
        if attempt + 1 < attempts {
            std::thread::sleep(interval);
        }
    }

    Err(BrrError::OutputNotReady {
        path: path.to_path_buf(),
        expected,
        found,
        attempts,
    })
}

//! Test fixture utilities for building IT modules on disk.

use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use sampconv_it::ItModuleWriter;
use tempfile::TempDir;

/// An IT module written into its own temporary directory.
pub struct ModuleFixture {
    pub root: TempDir,
    pub module_path: PathBuf,
}

impl ModuleFixture {
    /// Writes `writer` to `<tmp>/<file_name>`.
    pub fn new(file_name: &str, writer: &ItModuleWriter) -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let module_path = root.path().join(file_name);
        let bytes = writer.to_bytes().expect("Failed to serialize module");
        fs::write(&module_path, bytes).expect("Failed to write module");
        Self { root, module_path }
    }

    /// The temporary directory.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// A directory next to the module for conversion output.
    pub fn out_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }
}

/// `len` values rising by `step` from zero, wrapping in i16.
pub fn ramp(len: usize, step: i16) -> Vec<i16> {
    (0..len).map(|i| (i as i16).wrapping_mul(step)).collect()
}

/// `len` values of a sine with the given period and amplitude.
pub fn sine(len: usize, period: f64, amplitude: f64) -> Vec<i16> {
    (0..len)
        .map(|i| (amplitude * (2.0 * PI * i as f64 / period).sin()).round() as i16)
        .collect()
}

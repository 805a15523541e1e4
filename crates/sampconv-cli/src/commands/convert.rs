//! Convert command implementation
//!
//! Loads an IT module and converts every selected sample to a BRR file, then
//! writes the tuning file next to them.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use sampconv_brr::{
    finish, output_filename, tuning_line, BrrError, Encoder, EncoderConfig, FinishConfig,
    FinishedSample, ProcessEncoder,
};
use sampconv_it::{load_module_file, ItError, LoadedModule, LoadedSample};
use sampconv_sample::{CodedError, Kernel, Resampler, Sample, SampleError};

use super::json_output::{
    clipping_warning, error_codes, it_warning_to_json, ConvertOutput, JsonError, JsonWarning,
};
use crate::args::SampleMask;

/// Name of the tuning file written next to the BRR files.
pub const TUNINGS_FILE: &str = "tunings.txt";

/// Default root for output folders.
pub const DEFAULT_OUT_DIR: &str = "samples";

/// Options for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Input module path. Its file stem names the output folder.
    pub input: PathBuf,
    /// Root under which `<stem>/` is created.
    pub out_dir: PathBuf,
    /// Which samples to convert.
    pub mask: SampleMask,
    /// Length ratios by 1-based sample index.
    pub resample: BTreeMap<usize, f64>,
    /// Amplification ratios by 1-based sample index.
    pub amplify: BTreeMap<usize, f64>,
    /// Kernel for requested and corrective resampling.
    pub kernel: Kernel,
    /// Expect the encoder to prepend an initial block.
    pub initial_block: bool,
}

impl ConvertOptions {
    /// Creates options with defaults for everything but the input.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            mask: SampleMask::default(),
            resample: BTreeMap::new(),
            amplify: BTreeMap::new(),
            kernel: Kernel::default(),
            initial_block: true,
        }
    }

    /// Folder the artifacts go to: `<out_dir>/<input stem>`.
    pub fn output_folder(&self) -> PathBuf {
        let stem = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "module".to_string());
        self.out_dir.join(stem)
    }

    fn finish_config(&self) -> FinishConfig {
        FinishConfig::default()
            .initial_block(self.initial_block)
            .resampler(Resampler::new(self.kernel))
    }
}

/// One converted sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedSample {
    /// 1-based sample index
    pub index: usize,
    /// Sample name
    pub name: String,
    /// Output file name
    pub file: String,
    /// Encoded length in points
    pub length: usize,
    /// Encoded loop start in points
    pub loop_start: usize,
    /// Whether the encoded sample loops
    pub looped: bool,
    /// Final C-5 speed
    pub c5_speed: u32,
    /// Tuning value as written to the tuning file, e.g. `$0200`
    pub tuning: String,
    /// Artifact size including the loop pointer header
    pub brr_bytes: usize,
    /// BLAKE3 hex digest of the artifact
    pub brr_hash: String,
    /// A corrective resample ran to reach block alignment
    pub corrective_resample: bool,
    /// Peak before clipping was corrected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clipping_peak: Option<i32>,
    /// Predicted raw block stream size
    pub predicted_size: usize,
    /// Loop pointer written to the header
    pub loop_pointer: u16,
}

impl ConvertedSample {
    fn new(index: usize, file: String, finished: &FinishedSample) -> Self {
        let sample = &finished.sample;
        Self {
            index,
            name: sample.name.clone(),
            file,
            length: sample.len(),
            loop_start: sample.loop_start(),
            looped: sample.has_active_loop(),
            c5_speed: sample.c5_speed,
            tuning: format!("${:04X}", finished.tuning()),
            brr_bytes: finished.brr.len(),
            brr_hash: finished.hash(),
            corrective_resample: finished.corrective_resample,
            clipping_peak: finished.clipping_peak,
            predicted_size: finished.predicted_size,
            loop_pointer: finished.loop_pointer,
        }
    }
}

/// Result of a completed conversion.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    /// Folder the artifacts were written to.
    pub folder: PathBuf,
    /// Converted samples in table order.
    pub samples: Vec<ConvertedSample>,
    /// Indices skipped by the mask.
    pub skipped: Vec<usize>,
    /// Path of the tuning file.
    pub tunings: PathBuf,
}

/// Converts the selected samples of `module` and writes the artifacts.
///
/// `on_sample` runs after each artifact is written. On error, artifacts
/// already written stay on disk and no tuning file is written.
pub fn convert_module(
    options: &ConvertOptions,
    module: &LoadedModule,
    encoder: &dyn Encoder,
    mut on_sample: impl FnMut(&ConvertedSample, &FinishedSample),
) -> Result<ConvertReport> {
    let folder = options.output_folder();
    prepare_folder(&folder)?;

    let resampler = Resampler::new(options.kernel);
    let finish_config = options.finish_config();

    let mut samples = Vec::new();
    let mut skipped = Vec::new();
    let mut tunings = String::new();

    for loaded in &module.samples {
        if !loaded.has_data() {
            continue;
        }
        if !options.mask.selects(loaded.index) {
            skipped.push(loaded.index);
            continue;
        }

        let prepared = prepare_sample(options, &resampler, loaded)
            .with_context(|| format!("failed to prepare sample {}", loaded.index))?;
        let finished = finish(prepared, &finish_config, encoder)
            .with_context(|| format!("failed to encode sample {}", loaded.index))?;

        let file = output_filename(loaded.index, &finished.sample.name);
        let path = folder.join(&file);
        fs::write(&path, &finished.brr)
            .with_context(|| format!("failed to write {}", path.display()))?;

        tunings.push_str(&tuning_line(&file, finished.sample.c5_speed));
        tunings.push('\n');

        let converted = ConvertedSample::new(loaded.index, file, &finished);
        on_sample(&converted, &finished);
        samples.push(converted);
    }

    let tunings_path = folder.join(TUNINGS_FILE);
    fs::write(&tunings_path, tunings)
        .with_context(|| format!("failed to write {}", tunings_path.display()))?;

    Ok(ConvertReport {
        folder,
        samples,
        skipped,
        tunings: tunings_path,
    })
}

/// Trim, ping-pong expansion, then the requested amplification and resample.
fn prepare_sample(
    options: &ConvertOptions,
    resampler: &Resampler,
    loaded: &LoadedSample,
) -> Result<Sample> {
    let mut sample = loaded.sample.clone().trim().expand_ping_loop();
    if let Some(&ratio) = options.amplify.get(&loaded.index) {
        sample = sample.amplify(ratio);
    }
    if let Some(&ratio) = options.resample.get(&loaded.index) {
        let target = sample.len() as f64 * ratio;
        sample = resampler.resample(sample, target)?;
    }
    Ok(sample)
}

/// Creates the folder, or removes `.brr` files left by a previous run.
fn prepare_folder(folder: &Path) -> Result<()> {
    if !folder.is_dir() {
        return fs::create_dir_all(folder)
            .with_context(|| format!("failed to create {}", folder.display()));
    }

    let entries =
        fs::read_dir(folder).with_context(|| format!("failed to read {}", folder.display()))?;
    for entry in entries {
        let path = entry?.path();
        let is_brr = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("brr"));
        if is_brr && path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}

/// Stable code for the first coded error in the chain.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ItError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<BrrError>() {
            return e.code();
        }
        if let Some(e) = cause.downcast_ref::<SampleError>() {
            return e.code();
        }
        if cause.downcast_ref::<std::io::Error>().is_some() {
            return error_codes::OUTPUT_WRITE;
        }
    }
    error_codes::UNKNOWN
}

/// Run the convert command
///
/// # Returns
/// Exit code: 0 success, 1 on any fatal error
pub fn run(
    options: &ConvertOptions,
    encoder: EncoderConfig,
    verbose: bool,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        Ok(run_json(options, encoder))
    } else {
        run_human(options, encoder, verbose)
    }
}

/// Run convert with human-readable (colored) output
fn run_human(options: &ConvertOptions, encoder: EncoderConfig, verbose: bool) -> Result<ExitCode> {
    let start = Instant::now();

    println!(
        "{} {}",
        "Converting:".cyan().bold(),
        options.input.display()
    );
    println!(
        "{} {}",
        "Output folder:".cyan().bold(),
        options.output_folder().display()
    );

    let module = load_module_file(&options.input)
        .with_context(|| format!("failed to load module {}", options.input.display()))?;
    if !module.song_name.is_empty() {
        println!("{} {}", "Song:".dimmed(), module.song_name);
    }
    for warning in &module.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }

    let encoder = ProcessEncoder::new(encoder)?;
    if verbose {
        println!(
            "{} {} ({})",
            "Encoder:".dimmed(),
            encoder.program().display(),
            encoder.config().flavor
        );
        println!("{} {}", "Kernel:".dimmed(), options.kernel);
    }

    let report = convert_module(options, &module, &encoder, |converted, finished| {
        println!(
            "  {} {} {}",
            "+".green(),
            converted.file,
            format!("({} bytes, tuning {})", converted.brr_bytes, converted.tuning).dimmed()
        );
        if let Some(peak) = converted.clipping_peak {
            println!(
                "    {} clipped at peak {}, scaled down",
                "!".yellow(),
                peak
            );
        }
        if verbose {
            if finished.corrective_resample {
                println!("    {} corrective resample applied", "~".dimmed());
            }
            println!(
                "    {} length {}, loop start {}, predicted {} bytes, loop pointer ${:04X}",
                "~".dimmed(),
                converted.length,
                converted.loop_start,
                converted.predicted_size,
                converted.loop_pointer
            );
        }
    })?;

    if verbose && !report.skipped.is_empty() {
        let skipped: Vec<String> = report.skipped.iter().map(|i| i.to_string()).collect();
        println!("{} {}", "Skipped:".dimmed(), skipped.join(", "));
    }

    println!(
        "{} {} samples converted in {:?}",
        "SUCCESS".green().bold(),
        report.samples.len(),
        start.elapsed()
    );
    println!("{} {}", "Tunings:".dimmed(), report.tunings.display());

    Ok(ExitCode::SUCCESS)
}

/// Run convert with machine-readable JSON output
fn run_json(options: &ConvertOptions, encoder: EncoderConfig) -> ExitCode {
    let module_path = options.input.display().to_string();
    let mut samples = Vec::new();
    let mut warnings: Vec<JsonWarning> = Vec::new();

    let result = (|| -> Result<ConvertReport> {
        let module = load_module_file(&options.input)
            .with_context(|| format!("failed to load module {}", module_path))?;
        warnings.extend(module.warnings.iter().map(it_warning_to_json));

        let encoder = ProcessEncoder::new(encoder)?;
        convert_module(options, &module, &encoder, |converted, _| {
            if let Some(peak) = converted.clipping_peak {
                warnings.push(clipping_warning(converted.index, peak));
            }
            samples.push(converted.clone());
        })
    })();

    let (output, code) = match result {
        Ok(report) => (
            ConvertOutput::success(
                module_path,
                report.folder.display().to_string(),
                report.samples,
                warnings,
            ),
            ExitCode::SUCCESS,
        ),
        Err(err) => (
            ConvertOutput::failure(
                module_path,
                Some(options.output_folder().display().to_string()),
                samples,
                warnings,
                JsonError::new(error_code(&err), format!("{:#}", err)),
            ),
            ExitCode::from(1),
        ),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{}", json);
            code
        }
        Err(err) => {
            eprintln!("failed to serialize JSON output: {}", err);
            ExitCode::from(1)
        }
    }
}

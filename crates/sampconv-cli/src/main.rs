//! sampconv CLI - convert tracker module samples to BRR
//!
//! Reads the samples of an Impulse Tracker module, resamples them onto the
//! 16-sample block grid and encodes each one with an external BRR encoder.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use sampconv_brr::{EncoderConfig, EncoderFlavor};
use sampconv_cli::args::{parse_index_ratio, parse_mask, ratio_map, FlavorArg, KernelArg, SampleMask};
use sampconv_cli::commands::convert::{self, error_code, DEFAULT_OUT_DIR};
use sampconv_cli::ConvertOptions;
use sampconv_sample::DEFAULT_SINC_WIDTH;

/// sampconv - tracker sample to BRR converter
#[derive(Parser)]
#[command(name = "sampconv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every sample of an IT module to a BRR file plus a tuning file
    Convert {
        /// Path to the .it module
        input: PathBuf,

        /// Root folder for output; files go to <OUT_DIR>/<module name>/
        #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,

        /// Sample selection mask, one 0/1 per sample (missing means convert)
        #[arg(long, value_parser = parse_mask)]
        only: Option<SampleMask>,

        /// Length ratio for one sample, e.g. 3=0.5 (repeatable)
        #[arg(long, value_name = "INDEX=RATIO", value_parser = parse_index_ratio)]
        resample: Vec<(usize, f64)>,

        /// Amplification ratio for one sample, e.g. 2=1.5 (repeatable)
        #[arg(long, value_name = "INDEX=RATIO", value_parser = parse_index_ratio)]
        amplify: Vec<(usize, f64)>,

        /// Interpolation kernel
        #[arg(long, value_enum, default_value_t = KernelArg::Cubic)]
        kernel: KernelArg,

        /// Tap count for the sinc kernel
        #[arg(long, default_value_t = DEFAULT_SINC_WIDTH)]
        sinc_width: usize,

        /// Path to the encoder executable (default: $SAMPCONV_ENCODER, then PATH)
        #[arg(long)]
        encoder: Option<PathBuf>,

        /// Encoder command-line convention
        #[arg(long, value_enum, default_value_t = FlavorArg::BrrEncoder)]
        flavor: FlavorArg,

        /// Always pass 0 as the encoder's loop argument
        #[arg(long)]
        force_loop_zero: bool,

        /// Do not expect an extra block before a non-silent start
        #[arg(long)]
        no_initial_block: bool,

        /// Directory for scratch files (default: system temp dir)
        #[arg(long)]
        scratch_dir: Option<PathBuf>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,

        /// Print per-sample detail
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            out_dir,
            only,
            resample,
            amplify,
            kernel,
            sinc_width,
            encoder,
            flavor,
            force_loop_zero,
            no_initial_block,
            scratch_dir,
            json,
            verbose,
        } => kernel
            .to_kernel(sinc_width)
            .map_err(anyhow::Error::from)
            .and_then(|kernel| {
                let flavor = EncoderFlavor::from(flavor);
                let options = ConvertOptions {
                    out_dir,
                    mask: only.unwrap_or_default(),
                    resample: ratio_map(&resample),
                    amplify: ratio_map(&amplify),
                    kernel,
                    initial_block: flavor.prepends_initial_block() && !no_initial_block,
                    ..ConvertOptions::new(input)
                };

                let mut config = EncoderConfig::with_flavor(flavor).force_loop_zero(force_loop_zero);
                if let Some(path) = encoder {
                    config = config.program(path);
                }
                if let Some(dir) = scratch_dir {
                    config = config.scratch_dir(dir);
                }

                convert::run(&options, config, verbose, json)
            }),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!(
                "{}: [{}] {:#}",
                colored::Colorize::red("error"),
                error_code(&e),
                e
            );
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_convert_defaults() {
        let cli = Cli::try_parse_from(["sampconv", "convert", "song.it"]).unwrap();
        match cli.command {
            Commands::Convert {
                input,
                out_dir,
                only,
                resample,
                kernel,
                sinc_width,
                flavor,
                no_initial_block,
                json,
                ..
            } => {
                assert_eq!(input, PathBuf::from("song.it"));
                assert_eq!(out_dir, PathBuf::from("samples"));
                assert!(only.is_none());
                assert!(resample.is_empty());
                assert_eq!(kernel, KernelArg::Cubic);
                assert_eq!(sinc_width, 16);
                assert_eq!(flavor, FlavorArg::BrrEncoder);
                assert!(!no_initial_block);
                assert!(!json);
            }
        }
    }

    #[test]
    fn test_cli_parses_convert_options() {
        let cli = Cli::try_parse_from([
            "sampconv",
            "convert",
            "song.it",
            "--out-dir",
            "out",
            "--only",
            "101",
            "--resample",
            "1=0.5",
            "--resample",
            "3=2",
            "--amplify",
            "2=1.25",
            "--kernel",
            "sinc",
            "--sinc-width",
            "32",
            "--flavor",
            "snesbrr",
            "--force-loop-zero",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert {
                out_dir,
                only,
                resample,
                amplify,
                kernel,
                sinc_width,
                flavor,
                force_loop_zero,
                json,
                ..
            } => {
                assert_eq!(out_dir, PathBuf::from("out"));
                let mask = only.unwrap();
                assert!(!mask.selects(2));
                assert_eq!(resample, vec![(1, 0.5), (3, 2.0)]);
                assert_eq!(amplify, vec![(2, 1.25)]);
                assert_eq!(kernel, KernelArg::Sinc);
                assert_eq!(sinc_width, 32);
                assert_eq!(flavor, FlavorArg::Snesbrr);
                assert!(force_loop_zero);
                assert!(json);
            }
        }
    }

    #[test]
    fn test_cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["sampconv", "convert", "a.it", "--only", "12"]).is_err());
        assert!(Cli::try_parse_from(["sampconv", "convert", "a.it", "--resample", "0=1"]).is_err());
        assert!(Cli::try_parse_from(["sampconv", "convert", "a.it", "--kernel", "lanczos"]).is_err());
        assert!(Cli::try_parse_from(["sampconv", "convert"]).is_err());
    }
}

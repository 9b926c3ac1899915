//! wirescan CLI: derive wire-network masks from a micrograph and run the
//! embedded feature-analysis scripts against them.
//!
//! # Usage
//!
//! ```text
//! wirescan <IMAGE_PATH> --output-dir DIR --interpreter /usr/bin/python3 \
//!     --pixels-per-micro 12 [--iterations N] [--extra-iterations N]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wirescan::RunConfig;
use wirescan_pipeline::DeriveConfig;

/// Wire-network micrograph feature extraction.
///
/// Derives the median, segmentation, and wire-region masks from the input
/// image, writing them next to each other in the output directory, and
/// drives the small- and large-scale analysis scripts in the configured
/// interpreter.
#[derive(Parser)]
#[command(name = "wirescan", version)]
struct Cli {
    /// Path to the input micrograph (TIFF or PNG).
    image_path: PathBuf,

    /// Directory derived images are written to.
    #[arg(long, required_unless_present = "config_json")]
    output_dir: Option<PathBuf>,

    /// Interpreter executable for the embedded analysis scripts.
    #[arg(long, required_unless_present = "config_json")]
    interpreter: Option<PathBuf>,

    /// Pixels per micrometer (passed through to the analysis scripts).
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<u32>::new().range(1..))]
    pixels_per_micro: u32,

    /// Primary morphological iteration count (pass-through).
    #[arg(long, default_value_t = 0)]
    iterations: u32,

    /// Secondary morphological iteration count (pass-through).
    #[arg(long, default_value_t = 0)]
    extra_iterations: u32,

    /// Median neighborhood half-width in pixels.
    #[arg(long, default_value_t = DeriveConfig::DEFAULT_MEDIAN_RADIUS)]
    median_radius: u32,

    /// Median threshold offset.
    #[arg(long, default_value_t = DeriveConfig::DEFAULT_MEDIAN_OFFSET)]
    median_offset: i16,

    /// Full run config as a JSON string.
    ///
    /// When provided, all other configuration flags are ignored. The JSON
    /// must be a valid `RunConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

/// Build a [`RunConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and all
/// individual flags are ignored. Otherwise, a config is assembled from
/// the individual flags.
fn config_from_cli(cli: &Cli) -> Result<RunConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    let (Some(output_dir), Some(interpreter)) = (cli.output_dir.clone(), cli.interpreter.clone())
    else {
        return Err("--output-dir and --interpreter are required without --config-json".to_owned());
    };

    Ok(RunConfig {
        output_dir,
        interpreter,
        pixels_per_micro: cli.pixels_per_micro,
        iterations: cli.iterations,
        extra_iterations: cli.extra_iterations,
        derive: DeriveConfig {
            median_radius: cli.median_radius,
            median_offset: cli.median_offset,
        },
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = wirescan::run(&cli.image_path, &config) {
        eprintln!("wirescan failed: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

//! nansat_geotiffimage
//!
//! Make an 8-bit GeoTIFF figure for one band of a raster file. The band is
//! scaled between its minimum and maximum and colored with a colormap.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use geotiffimage::Toolkit;
use nansat_common::{init_tracing, LogLevel, LoggerRegistry, NansatError};

#[derive(Parser, Debug)]
#[command(name = "nansat_geotiffimage")]
#[command(about = "Make an 8-bit GeoTIFF figure for one band of a raster file")]
struct Args {
    /// Band number (starting at 1)
    band: usize,

    /// Input raster file
    input_file: PathBuf,

    /// Output GeoTIFF file
    output_file: PathBuf,

    /// Colormap used to color the band
    #[arg(long, default_value = "jet", env = "NANSAT_COLORMAP")]
    colormap: String,

    /// JSON file with extra colormap definitions
    #[arg(long, env = "NANSAT_COLORMAPS")]
    colormaps: Option<PathBuf>,

    /// Log level, numeric (10-50) or by name. Overrides LOG_LEVEL.
    #[arg(long)]
    log_level: Option<LogLevel>,
}

/// Loggers configured from LOG_LEVEL, unless a level was given on the command line.
fn logger_registry(log_level: Option<LogLevel>) -> LoggerRegistry {
    let loggers = LoggerRegistry::from_env();
    if let Some(level) = log_level {
        loggers.set_default_level(level);
    }
    loggers
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let loggers = logger_registry(args.log_level);
    init_tracing(loggers.default_level());

    match run(args, loggers) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<NansatError>()
                .map(NansatError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn run(args: Args, loggers: LoggerRegistry) -> Result<()> {
    let (mut toolkit, report) = Toolkit::initialize(loggers);
    if report.is_degraded() {
        info!("Continuing with a reduced colormap set");
    }

    if let Some(path) = &args.colormaps {
        toolkit
            .load_colormaps(path)
            .with_context(|| format!("Failed to load colormaps from {}", path.display()))?;
    }

    toolkit
        .export_band(args.band, &args.input_file, &args.output_file, &args.colormap)
        .with_context(|| {
            format!(
                "Failed to export band {} of {}",
                args.band,
                args.input_file.display()
            )
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_arguments() {
        let args = Args::try_parse_from(["nansat_geotiffimage", "2", "in.tif", "out.tif"]).unwrap();
        assert_eq!(args.band, 2);
        assert_eq!(args.input_file, PathBuf::from("in.tif"));
        assert_eq!(args.output_file, PathBuf::from("out.tif"));
        assert_eq!(args.colormap, "jet");
    }

    #[test]
    fn test_too_few_arguments_is_usage_error() {
        let err = Args::try_parse_from(["nansat_geotiffimage", "1", "in.tif"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_non_integer_band_is_usage_error() {
        let err =
            Args::try_parse_from(["nansat_geotiffimage", "one", "in.tif", "out.tif"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_log_level_by_name() {
        let args = Args::try_parse_from([
            "nansat_geotiffimage",
            "--log-level",
            "debug",
            "1",
            "in.tif",
            "out.tif",
        ])
        .unwrap();
        assert_eq!(args.log_level, Some(LogLevel::DEBUG));
        assert_eq!(logger_registry(args.log_level).default_level(), LogLevel::DEBUG);
    }

    #[test]
    fn test_log_level_defaults_to_environment() {
        let args = Args::try_parse_from(["nansat_geotiffimage", "1", "in.tif", "out.tif"]).unwrap();
        assert_eq!(args.log_level, None);
    }
}

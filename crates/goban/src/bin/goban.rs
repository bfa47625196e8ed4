//! goban CLI: board recognition from a photo plus recorded detections.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use goban::core::ImageBounds;
use goban::io::{load_channels, RecognitionReport, RecognizeConfig, RecordedDetections};
use goban::{calibrate_board, BoardRecognizer, CalibrationParams};

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "goban")]
#[command(about = "Recognize Go board size and stone positions from detector output")]
#[command(version)]
struct Cli {
    /// Log level: error, warn, info, debug or trace.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit structured JSON logs (with the `tracing` feature).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run full recognition from a JSON config and write a report.
    Recognize(RecognizeArgs),

    /// Calibrate the board from recorded line segments only.
    Calibrate(CalibrateArgs),
}

#[derive(Debug, Clone, Args)]
struct RecognizeArgs {
    /// Path to the recognition config (JSON).
    #[arg(long)]
    config: PathBuf,

    /// Override the report path from the config.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CalibrateArgs {
    /// Path to recorded detections (JSON).
    #[arg(long)]
    detections: PathBuf,

    /// Image width in pixels.
    #[arg(long)]
    width: u32,

    /// Image height in pixels.
    #[arg(long)]
    height: u32,

    /// Optional calibration parameters (JSON).
    #[arg(long)]
    params: Option<PathBuf>,
}

fn init_logging(level: &str, json: bool) {
    // Ignore errors if a logger was already installed.
    #[cfg(feature = "tracing")]
    {
        let _ = level;
        let _ = LogTracer::init();
        goban::core::init_tracing(json);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = json;
        let _ = goban::core::init_from_str(level);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json);

    let result = match cli.command {
        Commands::Recognize(args) => run_recognize(&args),
        Commands::Calibrate(args) => run_calibrate(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_recognize(args: &RecognizeArgs) -> CliResult<()> {
    let config = RecognizeConfig::load_json(&args.config)?;
    let detections = RecordedDetections::load_json(&config.detections_path)?;
    let channels = load_channels(&config.image_path)?;

    let recognizer = BoardRecognizer::new(config.params.clone(), &detections, &detections)?;
    let result = recognizer.recognize(&channels);
    let report = RecognitionReport::from_result(&result).with_image_path(config.image_path.clone());

    let out = args.out.clone().unwrap_or_else(|| config.output_path());
    report.write_json(&out)?;
    log::info!("report written to {}", out.display());

    result?;
    Ok(())
}

fn run_calibrate(args: &CalibrateArgs) -> CliResult<()> {
    let detections = RecordedDetections::load_json(&args.detections)?;
    let params: CalibrationParams = match &args.params {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => CalibrationParams::default(),
    };

    let bounds = ImageBounds::new(args.width, args.height);
    let calibration = calibrate_board(&detections.segments, bounds, &params)?;
    println!("{}", serde_json::to_string_pretty(&calibration)?);
    Ok(())
}

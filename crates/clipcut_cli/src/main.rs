//! ClipCut command-line front end.
//!
//! Marks segments on a source video from command-line ranges and runs
//! the export pipeline, streaming job log messages to stdout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{bail, Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use clipcut_core::config::ConfigManager;
use clipcut_core::export::ExportOrchestrator;
use clipcut_core::logging::{LogConfig, UiLogCallback};
use clipcut_core::models::EncodingMode;
use clipcut_core::timecode::Timebase;
use clipcut_core::timeline::TimelineState;

/// A `START:END` range in seconds.
#[derive(Debug, Clone, Copy)]
struct SegmentSpec {
    start: f64,
    end: f64,
}

impl FromStr for SegmentSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{}'", s))?;
        let start: f64 = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid start time '{}'", start))?;
        let end: f64 = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid end time '{}'", end))?;
        Ok(Self { start, end })
    }
}

#[derive(Parser, Debug)]
#[command(name = "clipcut", version, about = "Cut segments out of a video and stitch them together")]
struct Args {
    /// Source video file
    source: PathBuf,

    /// Segment to keep, as START:END in seconds (repeatable, in output order)
    #[arg(short, long = "segment", value_name = "START:END", required = true)]
    segments: Vec<SegmentSpec>,

    /// Encoding mode (copy or reencode), overriding the configured one
    #[arg(short, long)]
    mode: Option<EncodingMode>,

    /// Output file (default: <source>_cut next to the source)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    overwrite: bool,

    /// ffmpeg binary to use (default: ffmpeg from PATH)
    #[arg(long, value_name = "PATH")]
    ffmpeg: Option<PathBuf>,

    /// Config file, created with defaults if missing
    #[arg(short, long, default_value = "clipcut.toml")]
    config: PathBuf,

    /// Directory for per-job log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Source frame rate, used to clamp marks when known
    #[arg(long, default_value_t = 30.0)]
    fps: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    if !args.source.exists() {
        bail!("source file does not exist: {}", args.source.display());
    }

    let mut config = ConfigManager::new(&args.config);
    config
        .load_or_create()
        .with_context(|| format!("loading config {}", args.config.display()))?;

    let mut encoding = config.settings().encoding.clone();
    if let Some(mode) = args.mode {
        encoding.mode = mode;
    }

    // Frame count is unknown without probing, so marks are clamped at
    // zero only and ranges are trusted as given.
    let mut timeline = TimelineState::new();
    timeline.load_source(&args.source, Timebase::new(args.fps, 0));

    for spec in &args.segments {
        timeline.mark_start(spec.start)?;
        timeline.mark_end(spec.end)?;
        let label = timeline.add_segment()?;
        tracing::debug!("committed segment {}: {}:{}", label, spec.start, spec.end);
    }

    let mut orchestrator = ExportOrchestrator::new()
        .with_log_dir(&args.log_dir)
        .with_log_config(LogConfig::from(&config.settings().logging));
    if let Some(ffmpeg) = &args.ffmpeg {
        orchestrator = orchestrator.with_program(ffmpeg);
    }

    let callback: UiLogCallback = Box::new(|message| println!("{}", message));
    let handle = orchestrator.submit(
        &timeline,
        &encoding,
        args.output.clone(),
        args.overwrite,
        Some(callback),
    )?;

    let outcome = handle.wait();
    if outcome.success {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "Export failed: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_spec_parses() {
        let spec: SegmentSpec = "1.5:4".parse().unwrap();
        assert_eq!(spec.start, 1.5);
        assert_eq!(spec.end, 4.0);
    }

    #[test]
    fn segment_spec_rejects_garbage() {
        assert!("1.5".parse::<SegmentSpec>().is_err());
        assert!("a:b".parse::<SegmentSpec>().is_err());
    }

    #[test]
    fn args_verify() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}

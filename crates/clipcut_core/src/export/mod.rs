//! Export pipeline: extraction, concatenation, and job orchestration.
//!
//! An export takes the timeline's committed segments, extracts each one
//! into a temp artifact with ffmpeg, joins the artifacts with the concat
//! demuxer (or a plain copy for a single segment), deletes the temp
//! files, and reports exactly one terminal outcome per accepted job.

pub mod command;
pub mod concat;
pub mod errors;
pub mod orchestrator;
pub mod runner;
pub mod stage;
pub mod stages;
pub mod temp;

pub use command::default_output_path;
pub use errors::{ExportError, ExportResult, StageError, StageResult};
pub use orchestrator::{ExportHandle, ExportMessage, ExportOrchestrator};
pub use runner::FfmpegRunner;
pub use stage::{Context, ExportStage, JobState};
pub use temp::TempArtifacts;

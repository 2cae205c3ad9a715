//! Stage trait and shared job state for the export pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use super::errors::StageResult;
use super::runner::FfmpegRunner;
use super::temp::TempArtifacts;
use crate::logging::JobLogger;
use crate::models::ExportJob;

/// Read-only context shared by all stages of one job.
pub struct Context {
    /// The job description, snapshotted at submission.
    pub job: ExportJob,
    /// Process runner for ffmpeg invocations.
    pub runner: FfmpegRunner,
    /// Per-job logger.
    pub logger: Arc<JobLogger>,
}

/// Mutable state threaded through the stages.
pub struct JobState {
    /// Temp artifact tracker for this job.
    pub temp: TempArtifacts,
    /// The finished output, set by the stage that produces it.
    pub output: Option<PathBuf>,
}

impl JobState {
    pub fn new(temp: TempArtifacts) -> Self {
        Self { temp, output: None }
    }
}

/// A single stage of the export pipeline.
///
/// Stages run in order on the worker thread; the first error stops the
/// pipeline and becomes the job's failure.
pub trait ExportStage {
    /// Stage name for logging and error context.
    fn name(&self) -> &'static str;

    /// Execute the stage.
    fn execute(&self, ctx: &Context, state: &mut JobState) -> StageResult<()>;
}

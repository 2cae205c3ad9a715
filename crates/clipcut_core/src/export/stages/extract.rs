//! Segment extraction stage.

use super::super::command::{artifact_extension, encode_params, extract_args};
use super::super::errors::{StageError, StageResult};
use super::super::stage::{Context, ExportStage, JobState};

/// Extracts each committed segment into its own temp artifact.
///
/// Segments are processed sequentially in timeline order; the first
/// failed invocation aborts the stage so no later segment runs.
pub struct ExtractStage;

impl ExportStage for ExtractStage {
    fn name(&self) -> &'static str {
        "Extract"
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StageResult<()> {
        let job = &ctx.job;
        let params = encode_params(job.mode, &job.reencode_tokens);
        let extension = artifact_extension(job.mode, &job.source_path);
        let total = job.segments.len();

        for (index, segment) in job.segments.iter().enumerate() {
            ctx.logger
                .info(&format!("Extracting segment {}/{}", index + 1, total));

            let dest = state.temp.segment_path(index, &extension);
            let args = extract_args(&job.source_path, *segment, &params, &dest);
            ctx.runner.run(&args, &ctx.logger)?;

            if !dest.exists() {
                return Err(StageError::missing_artifact(dest));
            }
        }

        Ok(())
    }
}

//! Concatenation stage.

use std::fs;

use super::super::command::concat_args;
use super::super::concat::write_concat_list;
use super::super::errors::{StageError, StageResult};
use super::super::stage::{Context, ExportStage, JobState};

/// Joins the extracted segment artifacts into the final output.
///
/// A single segment is copied straight to the output without invoking
/// the concat demuxer. Multiple segments go through a list file and a
/// stream-copy concat run.
pub struct ConcatStage;

impl ExportStage for ConcatStage {
    fn name(&self) -> &'static str {
        "Concatenate"
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StageResult<()> {
        let output = &ctx.job.output_path;
        let artifacts = state.temp.files().to_vec();

        if artifacts.len() == 1 {
            ctx.logger.info("Single segment, copying to output");
            fs::copy(&artifacts[0], output)
                .map_err(|e| StageError::io("copying single segment to output", e))?;
        } else {
            ctx.logger
                .info(&format!("Concatenating {} segments", artifacts.len()));

            let list_path = state.temp.list_path();
            write_concat_list(&artifacts, &list_path)?;

            let args = concat_args(&list_path, output);
            ctx.runner.run(&args, &ctx.logger)?;
        }

        if !output.exists() {
            return Err(StageError::missing_artifact(output.clone()));
        }

        state.output = Some(output.clone());
        Ok(())
    }
}

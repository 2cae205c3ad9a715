//! External process execution for ffmpeg invocations.

use std::path::PathBuf;
use std::process::Command;

use super::errors::{StageError, StageResult};
use crate::logging::JobLogger;

/// Runs ffmpeg and routes its captured output through the job logger.
#[derive(Debug, Clone)]
pub struct FfmpegRunner {
    program: PathBuf,
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegRunner {
    /// Runner resolving `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }

    /// Runner using an explicit ffmpeg binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The binary this runner invokes.
    pub fn program(&self) -> &PathBuf {
        &self.program
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Run the tool to completion, capturing stdout and stderr.
    ///
    /// Every captured line goes to the logger. A non-zero exit shows the
    /// output tail and returns a `CommandFailed` with the exit code.
    pub fn run(&self, args: &[String], logger: &JobLogger) -> StageResult<()> {
        let tool = self.tool_name();
        logger.command(&format!("{} {}", tool, args.join(" ")));

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| StageError::io(format!("spawning {}", tool), e))?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            logger.output_line(line, false);
        }
        for line in String::from_utf8_lossy(&output.stderr).lines() {
            logger.output_line(line, true);
        }

        if output.status.success() {
            Ok(())
        } else {
            let exit_code = output.status.code().unwrap_or(-1);
            logger.show_tail(&tool);
            Err(StageError::command_failed(
                tool,
                exit_code,
                format!("command exited with status {}", exit_code),
            ))
        }
    }
}

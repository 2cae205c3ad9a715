//! Export job orchestration.
//!
//! One job at a time: submission validates on the calling thread, then
//! the pipeline runs on a dedicated worker thread and reports exactly
//! one terminal message through a channel. There is no queue and no
//! cancellation; a submission while a job runs is rejected outright.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use super::command::default_output_path;
use super::errors::{ExportError, ExportResult};
use super::runner::FfmpegRunner;
use super::stage::{Context, ExportStage, JobState};
use super::stages::{ConcatStage, ExtractStage};
use super::temp::TempArtifacts;
use crate::config::EncodingSettings;
use crate::logging::{JobLogger, LogConfig, UiLogCallback};
use crate::models::{ExportJob, ExportOutcome};
use crate::timeline::TimelineState;

/// Message delivered when a job reaches its terminal state.
///
/// Exactly one is sent per accepted submission, success or failure.
#[derive(Debug)]
pub enum ExportMessage {
    Finished(ExportOutcome),
}

/// Receiving side of a running export job.
#[derive(Debug)]
pub struct ExportHandle {
    receiver: Receiver<ExportMessage>,
    output_path: PathBuf,
}

impl ExportHandle {
    /// The output path the job will produce on success.
    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    /// Poll for the terminal message without blocking.
    pub fn try_message(&self) -> Option<ExportMessage> {
        self.receiver.try_recv().ok()
    }

    /// Block until the job finishes and return its outcome.
    pub fn wait(self) -> ExportOutcome {
        match self.receiver.recv() {
            Ok(ExportMessage::Finished(outcome)) => outcome,
            Err(_) => ExportOutcome::failed("Export worker exited without reporting a result"),
        }
    }
}

/// Validates, launches, and tracks export jobs.
pub struct ExportOrchestrator {
    runner: FfmpegRunner,
    temp_dir: PathBuf,
    log_dir: PathBuf,
    log_config: LogConfig,
    busy: Arc<AtomicBool>,
}

impl Default for ExportOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportOrchestrator {
    pub fn new() -> Self {
        Self {
            runner: FfmpegRunner::new(),
            temp_dir: std::env::temp_dir(),
            log_dir: PathBuf::from("logs"),
            log_config: LogConfig::default(),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use an explicit ffmpeg binary.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.runner = FfmpegRunner::with_program(program);
        self
    }

    /// Place temp artifacts in a specific directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Place job logs in a specific directory.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Whether a job is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Validate and launch an export job.
    ///
    /// Validation happens here, synchronously, so rejections never reach
    /// the worker. The job runs against a value snapshot of the timeline:
    /// edits made after submission do not affect it.
    pub fn submit(
        &self,
        timeline: &TimelineState,
        encoding: &EncodingSettings,
        output: Option<PathBuf>,
        overwrite: bool,
        ui_callback: Option<UiLogCallback>,
    ) -> ExportResult<ExportHandle> {
        if self.busy.load(Ordering::SeqCst) {
            return Err(ExportError::JobActive);
        }

        let source = timeline.source().ok_or(ExportError::NoSource)?;
        if timeline.is_empty() {
            return Err(ExportError::NoSegments);
        }

        let output_path =
            output.unwrap_or_else(|| default_output_path(&source.path, encoding.mode));
        if output_path.exists() && !overwrite {
            return Err(ExportError::output_exists(output_path));
        }

        let job = ExportJob {
            source_path: source.path.clone(),
            segments: timeline.snapshot(),
            mode: encoding.mode,
            reencode_tokens: encoding.reencode_tokens(),
            output_path,
        };

        // Claim the busy flag before spawning so a second submit made
        // right after this one is rejected, not raced.
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ExportError::JobActive);
        }

        let logger = match JobLogger::new(
            job.label(),
            &self.log_dir,
            self.log_config.clone(),
            ui_callback,
        ) {
            Ok(logger) => Arc::new(logger),
            Err(e) => {
                self.busy.store(false, Ordering::SeqCst);
                return Err(ExportError::setup_failed(format!(
                    "could not create job log: {}",
                    e
                )));
            }
        };

        let handle_output = job.output_path.clone();
        let ctx = Context {
            job,
            runner: self.runner.clone(),
            logger,
        };
        let temp = TempArtifacts::new(&self.temp_dir);
        let busy = self.busy.clone();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let outcome = run_job(&ctx, temp);
            ctx.logger.flush();
            // Release before the terminal send so a caller reacting to
            // the message can immediately submit the next job.
            busy.store(false, Ordering::SeqCst);
            let _ = tx.send(ExportMessage::Finished(outcome));
        });

        Ok(ExportHandle {
            receiver: rx,
            output_path: handle_output,
        })
    }
}

/// Run the stages for one job and produce its terminal outcome.
///
/// Temp cleanup always runs, after the outcome is already decided, so a
/// cleanup failure can never flip a successful export to a failure.
fn run_job(ctx: &Context, temp: TempArtifacts) -> ExportOutcome {
    let stages: Vec<Box<dyn ExportStage>> = vec![Box::new(ExtractStage), Box::new(ConcatStage)];
    let mut state = JobState::new(temp);

    let mut outcome = ExportOutcome::completed(ctx.job.output_path.clone());
    for stage in &stages {
        ctx.logger.phase(stage.name());
        if let Err(e) = stage.execute(ctx, &mut state) {
            let err = ExportError::stage_failed(stage.name(), e);
            ctx.logger.error(&err.to_string());
            outcome = ExportOutcome::failed(err.to_string());
            break;
        }
    }

    ctx.logger.phase("Cleanup");
    state.temp.cleanup();

    if outcome.success {
        ctx.logger
            .success(&format!("Export complete: {}", ctx.job.output_path.display()));
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timecode::Timebase;
    use tempfile::tempdir;

    fn loaded_timeline(dir: &std::path::Path) -> (TimelineState, PathBuf) {
        let source = dir.join("movie.mkv");
        std::fs::write(&source, "video").unwrap();

        let mut timeline = TimelineState::new();
        timeline.load_source(source.clone(), Timebase::new(30.0, 900));
        (timeline, source)
    }

    #[test]
    fn rejects_empty_timeline() {
        let dir = tempdir().unwrap();
        let (timeline, _) = loaded_timeline(dir.path());

        let orch = ExportOrchestrator::new();
        let err = orch
            .submit(&timeline, &EncodingSettings::default(), None, false, None)
            .unwrap_err();
        assert!(matches!(err, ExportError::NoSegments));
    }

    #[test]
    fn rejects_unloaded_timeline() {
        let orch = ExportOrchestrator::new();
        let err = orch
            .submit(
                &TimelineState::new(),
                &EncodingSettings::default(),
                None,
                false,
                None,
            )
            .unwrap_err();
        assert!(matches!(err, ExportError::NoSource));
    }

    #[test]
    fn rejects_existing_output_without_overwrite() {
        let dir = tempdir().unwrap();
        let (mut timeline, source) = loaded_timeline(dir.path());
        timeline.mark_start(1.0).unwrap();
        timeline.mark_end(2.0).unwrap();
        timeline.add_segment().unwrap();

        let existing = source.with_file_name("movie_cut.mkv");
        std::fs::write(&existing, "old").unwrap();

        let orch = ExportOrchestrator::new();
        let err = orch
            .submit(&timeline, &EncodingSettings::default(), None, false, None)
            .unwrap_err();
        assert!(matches!(err, ExportError::OutputExists { .. }));
    }

    #[test]
    fn resolves_default_output_path() {
        let dir = tempdir().unwrap();
        let (mut timeline, source) = loaded_timeline(dir.path());
        timeline.mark_start(1.0).unwrap();
        timeline.mark_end(2.0).unwrap();
        timeline.add_segment().unwrap();

        // Use a runner that cannot start so the job fails fast; the
        // handle still reports the resolved output path.
        let orch = ExportOrchestrator::new()
            .with_program(dir.path().join("missing-ffmpeg"))
            .with_log_dir(dir.path().join("logs"))
            .with_temp_dir(dir.path());

        let handle = orch
            .submit(&timeline, &EncodingSettings::default(), None, false, None)
            .unwrap();
        assert_eq!(
            handle.output_path(),
            &source.with_file_name("movie_cut.mkv")
        );

        let outcome = handle.wait();
        assert!(!outcome.success);
        assert!(!orch.is_busy());
    }
}

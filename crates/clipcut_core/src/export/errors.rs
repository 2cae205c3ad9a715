//! Error types for the export pipeline.
//!
//! Two layers: `ExportError` is the job-level error the caller sees,
//! `StageError` carries the failure of an individual pipeline stage so
//! failure provenance is a typed value, not a caught exception.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level export error.
#[derive(Error, Debug)]
pub enum ExportError {
    /// An export job is already running (single job at a time, no queue).
    #[error("An export is already in progress")]
    JobActive,

    /// The timeline has no committed segments.
    #[error("No segments to cut")]
    NoSegments,

    /// No source is loaded.
    #[error("No video loaded")]
    NoSource,

    /// The output path exists and overwrite was not confirmed.
    #[error("Output file already exists: {}", .path.display())]
    OutputExists { path: PathBuf },

    /// Failed to set up the job before the worker started.
    #[error("Failed to set up export: {message}")]
    SetupFailed { message: String },

    /// A pipeline stage failed on the worker.
    #[error("Export failed at stage '{stage}': {source}")]
    StageFailed {
        stage: String,
        #[source]
        source: StageError,
    },
}

impl ExportError {
    /// Create an output-exists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create a setup failed error.
    pub fn setup_failed(message: impl Into<String>) -> Self {
        Self::SetupFailed {
            message: message.into(),
        }
    }

    /// Create a stage failed error.
    pub fn stage_failed(stage: impl Into<String>, source: StageError) -> Self {
        Self::StageFailed {
            stage: stage.into(),
            source,
        }
    }
}

/// Error from a single export stage.
#[derive(Error, Debug)]
pub enum StageError {
    /// An external command exited non-zero. Carries the captured output.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// File I/O error with operation context.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// The external command succeeded but the expected file is missing.
    #[error("Expected artifact missing: {}", .path.display())]
    MissingArtifact { path: PathBuf },
}

impl StageError {
    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a missing artifact error.
    pub fn missing_artifact(path: impl Into<PathBuf>) -> Self {
        Self::MissingArtifact { path: path.into() }
    }
}

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;

/// Result type for job-level operations.
pub type ExportResult<T> = Result<T, ExportError>;

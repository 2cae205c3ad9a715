//! Job-related data structures (segments, snapshots, results).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::enums::EncodingMode;

/// A committed `[start, end)` time range in seconds.
///
/// Invariant: `0 <= start < end <= source duration`. Enforced by the
/// timeline when the segment is committed; segments are immutable after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start position in seconds.
    pub start: f64,
    /// End position in seconds.
    pub end: f64,
}

impl Segment {
    /// Create a segment. Range validation happens at commit time.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Immutable snapshot of everything an export needs, taken at submission.
///
/// Later mutation of the live timeline must not affect an in-flight job,
/// so the segment list is a value copy, never a shared reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportJob {
    /// Path to the loaded source file.
    pub source_path: PathBuf,
    /// Segments in concatenation order, copied from the timeline.
    pub segments: Vec<Segment>,
    /// Encoding strategy for extraction.
    pub mode: EncodingMode,
    /// Resolved re-encode parameter tokens (ignored in copy mode).
    pub reencode_tokens: Vec<String>,
    /// Final output path.
    pub output_path: PathBuf,
}

impl ExportJob {
    /// Short label for logging, derived from the output file name.
    pub fn label(&self) -> String {
        self.output_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "export".to_string())
    }
}

/// Terminal result of an export job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutcome {
    /// Whether the job completed successfully.
    pub success: bool,
    /// Path to the produced file (if successful).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// Human-readable failure reason (if failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportOutcome {
    /// Create a successful outcome.
    pub fn completed(output_path: PathBuf) -> Self {
        Self {
            success: true,
            output_path: Some(output_path),
            error: None,
        }
    }

    /// Create a failed outcome.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output_path: None,
            error: Some(error.into()),
        }
    }
}

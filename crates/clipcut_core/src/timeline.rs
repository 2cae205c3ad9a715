//! Timeline model: pending marks and the ordered segment list.
//!
//! Owned exclusively by the interactive surface and mutated only through
//! these operations, all synchronous. The segment order is meaningful:
//! it is both the visual list order and the export concatenation order.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Segment;
use crate::timecode::{format_timestamp, Timebase};

/// Errors from timeline operations.
///
/// All of these are rejected synchronously, before any state changes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// Operation requires a loaded source.
    #[error("No video loaded")]
    NoSource,

    /// Segment commit attempted without both marks set.
    #[error("Both start and end marks must be set")]
    MissingMarks,

    /// Segment commit attempted with start >= end.
    #[error("Start time {start:.3} must be before end time {end:.3}")]
    InvalidRange { start: f64, end: f64 },
}

/// The source file the timeline is marking against.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInfo {
    /// Path to the loaded video file.
    pub path: PathBuf,
    /// Frame rate and frame count reported by the container.
    pub timebase: Timebase,
}

/// Mutable timeline state: loaded source, pending marks, committed segments.
#[derive(Debug, Clone, Default)]
pub struct TimelineState {
    source: Option<SourceInfo>,
    start_mark: Option<f64>,
    end_mark: Option<f64>,
    segments: Vec<Segment>,
}

impl TimelineState {
    /// Create an empty timeline with no source loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a source, resetting marks and segments.
    pub fn load_source(&mut self, path: impl Into<PathBuf>, timebase: Timebase) {
        self.source = Some(SourceInfo {
            path: path.into(),
            timebase,
        });
        self.start_mark = None;
        self.end_mark = None;
        self.segments.clear();
    }

    /// Get the loaded source, if any.
    pub fn source(&self) -> Option<&SourceInfo> {
        self.source.as_ref()
    }

    /// Get the source path, if a source is loaded.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_ref().map(|s| s.path.as_path())
    }

    /// Get the pending start mark.
    pub fn start_mark(&self) -> Option<f64> {
        self.start_mark
    }

    /// Get the pending end mark.
    pub fn end_mark(&self) -> Option<f64> {
        self.end_mark
    }

    /// Set the pending start mark at the given position in seconds.
    pub fn mark_start(&mut self, at: f64) -> Result<(), TimelineError> {
        self.start_mark = Some(self.clamp_to_source(at)?);
        Ok(())
    }

    /// Set the pending end mark at the given position in seconds.
    pub fn mark_end(&mut self, at: f64) -> Result<(), TimelineError> {
        self.end_mark = Some(self.clamp_to_source(at)?);
        Ok(())
    }

    /// Commit the pending marks into a segment.
    ///
    /// Requires both marks set and `start < end`. On success the segment
    /// is appended, both marks are cleared, and the 1-based display label
    /// of the new entry is returned. On failure nothing changes.
    pub fn add_segment(&mut self) -> Result<usize, TimelineError> {
        let (start, end) = match (self.start_mark, self.end_mark) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(TimelineError::MissingMarks),
        };
        if start >= end {
            return Err(TimelineError::InvalidRange { start, end });
        }

        self.segments.push(Segment::new(start, end));
        self.start_mark = None;
        self.end_mark = None;
        Ok(self.segments.len())
    }

    /// Remove the segment at `index`. Remaining entries renumber for display.
    pub fn delete(&mut self, index: usize) -> Option<Segment> {
        if index < self.segments.len() {
            Some(self.segments.remove(index))
        } else {
            None
        }
    }

    /// Swap the segment at `index` with the one above it.
    ///
    /// No-op at the top boundary. Returns whether a swap happened.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.segments.len() {
            return false;
        }
        self.segments.swap(index, index - 1);
        true
    }

    /// Swap the segment at `index` with the one below it.
    ///
    /// No-op at the bottom boundary. Returns whether a swap happened.
    pub fn move_down(&mut self, index: usize) -> bool {
        if self.segments.is_empty() || index >= self.segments.len() - 1 {
            return false;
        }
        self.segments.swap(index, index + 1);
        true
    }

    /// Remove all segments. Pending marks are kept.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Committed segments in concatenation order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of committed segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no committed segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Value copy of the segment list for job submission.
    pub fn snapshot(&self) -> Vec<Segment> {
        self.segments.clone()
    }

    /// Display labels for the segment list, 1-based and contiguous.
    pub fn display_entries(&self) -> Vec<String> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, seg)| {
                format!(
                    "{}. {} > {}",
                    i + 1,
                    format_timestamp(seg.start),
                    format_timestamp(seg.end)
                )
            })
            .collect()
    }

    /// Clamp a position into the loaded source's valid range.
    fn clamp_to_source(&self, at: f64) -> Result<f64, TimelineError> {
        let source = self.source.as_ref().ok_or(TimelineError::NoSource)?;
        let at = at.max(0.0);
        let duration = source.timebase.duration();
        // Duration reads as zero when the frame count is unknown
        if duration > 0.0 {
            Ok(at.min(duration))
        } else {
            Ok(at)
        }
    }
}

//! Frame/time conversion and timestamp formatting.

/// Frame rate and frame count of a loaded source.
///
/// All timeline positions are stored in seconds; the timebase converts
/// between seconds and frame indices for display and stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timebase {
    fps: f64,
    total_frames: u64,
}

impl Timebase {
    /// Frame rate assumed when the container reports a non-positive value.
    pub const FALLBACK_FPS: f64 = 30.0;

    /// Create a timebase from the values the container reports.
    ///
    /// A non-positive `fps` falls back to [`Self::FALLBACK_FPS`]. A
    /// `total_frames` of zero means the frame count is unknown; the
    /// duration then reads as zero and frame clamping has no upper bound.
    pub fn new(fps: f64, total_frames: u64) -> Self {
        let fps = if fps > 0.0 { fps } else { Self::FALLBACK_FPS };
        Self { fps, total_frames }
    }

    /// Get the frame rate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Get the total frame count (zero if unknown).
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Total duration in seconds (zero when the frame count is unknown).
    pub fn duration(&self) -> f64 {
        self.total_frames as f64 / self.fps
    }

    /// Convert a frame index to seconds.
    pub fn frame_to_seconds(&self, frame: u64) -> f64 {
        frame as f64 / self.fps
    }

    /// Convert seconds to a frame index.
    ///
    /// Truncates toward the preceding frame and clamps into
    /// `[0, total_frames - 1]` when the frame count is known.
    pub fn seconds_to_frame(&self, seconds: f64) -> u64 {
        let frame = (seconds * self.fps).floor();
        if frame <= 0.0 {
            return 0;
        }
        let frame = frame as u64;
        match self.total_frames {
            0 => frame,
            n => frame.min(n - 1),
        }
    }
}

/// Format a position in seconds as `HH:MM:SS.mmm`.
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = seconds % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours, minutes, secs)
}

/// Format an optional mark, showing a placeholder when unset.
pub fn format_mark(mark: Option<f64>) -> String {
    match mark {
        Some(seconds) => format_timestamp(seconds),
        None => "--:--:--.---".to_string(),
    }
}

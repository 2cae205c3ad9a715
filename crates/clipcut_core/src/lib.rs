//! ClipCut core - segment marking and export logic for the video cutter.
//!
//! This crate contains all business logic with zero UI dependencies.
//! The interactive surface (GUI or CLI) owns a [`timeline::TimelineState`],
//! mutates it through its operations, and hands an immutable snapshot to
//! the [`export::ExportOrchestrator`] which runs ffmpeg on a background
//! worker and posts exactly one terminal message back.

pub mod config;
pub mod export;
pub mod logging;
pub mod models;
pub mod timecode;
pub mod timeline;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}

//! Concat demuxer list file construction.

use std::fs;
use std::path::Path;

use super::errors::{StageError, StageResult};

/// Escape a path for a concat demuxer list line.
///
/// Backslashes become forward slashes and embedded single quotes are
/// escaped as `'\''` so the quoted list-file syntax stays valid.
pub fn escape_list_path(path: &Path) -> String {
    path.display()
        .to_string()
        .replace('\\', "/")
        .replace('\'', "'\\''")
}

/// Write the concat list file, one `file '<path>'` line per artifact.
///
/// The artifact order is the concatenation order.
pub fn write_concat_list(artifacts: &[impl AsRef<Path>], list_path: &Path) -> StageResult<()> {
    let mut content = String::new();
    for artifact in artifacts {
        content.push_str(&format!("file '{}'\n", escape_list_path(artifact.as_ref())));
    }

    fs::write(list_path, content).map_err(|e| StageError::io("writing concat list", e))
}

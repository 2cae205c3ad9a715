//! Temp artifact allocation and best-effort cleanup.

use std::fs;
use std::path::{Path, PathBuf};

/// Tracks the temporary files one export job produces.
///
/// Artifacts are named deterministically by job-local segment index.
/// Lifetime is bounded to the job: everything allocated here is deleted
/// by [`cleanup`](Self::cleanup) once the job reaches a terminal state.
#[derive(Debug)]
pub struct TempArtifacts {
    dir: PathBuf,
    files: Vec<PathBuf>,
    list_file: Option<PathBuf>,
}

impl TempArtifacts {
    /// Track artifacts under the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
            list_file: None,
        }
    }

    /// Directory the artifacts live in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Allocate the artifact path for a segment index.
    pub fn segment_path(&mut self, index: usize, extension: &str) -> PathBuf {
        let path = self.dir.join(format!("segment_{}{}", index, extension));
        self.files.push(path.clone());
        path
    }

    /// Allocate the concat list file path.
    pub fn list_path(&mut self) -> PathBuf {
        let path = self.dir.join("concat_list.txt");
        self.list_file = Some(path.clone());
        path
    }

    /// Segment artifacts allocated so far, in allocation order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Delete every allocated artifact and the list file, best effort.
    ///
    /// Runs after the job's terminal state is decided; failures are
    /// logged and never surfaced to the caller.
    pub fn cleanup(&self) {
        let list = self.list_file.iter();
        for path in self.files.iter().chain(list) {
            if let Err(e) = fs::remove_file(path) {
                tracing::debug!("Could not remove temp file {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn segment_paths_are_indexed() {
        let mut temp = TempArtifacts::new("/tmp");
        assert_eq!(
            temp.segment_path(0, ".mkv"),
            PathBuf::from("/tmp/segment_0.mkv")
        );
        assert_eq!(
            temp.segment_path(1, ".mp4"),
            PathBuf::from("/tmp/segment_1.mp4")
        );
        assert_eq!(temp.files().len(), 2);
    }

    #[test]
    fn cleanup_removes_artifacts_and_list() {
        let dir = tempdir().unwrap();
        let mut temp = TempArtifacts::new(dir.path());

        let seg = temp.segment_path(0, ".mkv");
        let list = temp.list_path();
        fs::write(&seg, "data").unwrap();
        fs::write(&list, "file 'x'\n").unwrap();

        temp.cleanup();
        assert!(!seg.exists());
        assert!(!list.exists());
    }

    #[test]
    fn cleanup_swallows_missing_files() {
        let dir = tempdir().unwrap();
        let mut temp = TempArtifacts::new(dir.path());
        temp.segment_path(0, ".mkv");
        // Never created; cleanup must not panic or error
        temp.cleanup();
    }
}

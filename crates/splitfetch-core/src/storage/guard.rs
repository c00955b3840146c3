//! RAII guard that deletes segment files when dropped.

use std::path::PathBuf;

/// Deletion obligation for a set of segment files.
///
/// Acquired before any worker writes; dropping it removes whatever files
/// exist. The merger takes over the obligation on success via `disarm`.
#[derive(Debug)]
pub struct PartFileGuard {
    paths: Vec<PathBuf>,
}

impl PartFileGuard {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Release the obligation without deleting anything.
    pub fn disarm(mut self) {
        self.paths.clear();
    }
}

impl Drop for PartFileGuard {
    fn drop(&mut self) {
        for path in &self.paths {
            match std::fs::remove_file(path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed segment file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(path = %path.display(), "could not remove segment file: {}", e),
            }
        }
    }
}

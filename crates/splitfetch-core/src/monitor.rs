//! Download records: output path → completion percentage.
//!
//! A record is registered when the output path is known and receives exactly
//! one update when the operation ends: 100 on success, [`FAILED`] otherwise.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Percentage reported for a failed download.
pub const FAILED: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    pub path: PathBuf,
    /// 0..=100, or [`FAILED`].
    pub percent: i32,
}

impl DownloadRecord {
    pub fn is_failed(&self) -> bool {
        self.percent == FAILED
    }

    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }
}

#[derive(Debug, Default)]
pub struct Monitor {
    records: Mutex<Vec<DownloadRecord>>,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DownloadRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `path` at 0%. Re-registering an existing path resets it.
    pub fn add_download(&self, path: &Path) {
        let mut records = self.lock();
        match records.iter_mut().find(|r| r.path == path) {
            Some(r) => r.percent = 0,
            None => records.push(DownloadRecord {
                path: path.to_path_buf(),
                percent: 0,
            }),
        }
    }

    /// Set the percentage for a registered path. Unknown paths are ignored.
    pub fn update_progress(&self, path: &Path, percent: i32) {
        let mut records = self.lock();
        match records.iter_mut().find(|r| r.path == path) {
            Some(r) => r.percent = percent,
            None => tracing::warn!(path = %path.display(), "progress update for unknown download"),
        }
    }

    pub fn get(&self, path: &Path) -> Option<DownloadRecord> {
        self.lock().iter().find(|r| r.path == path).cloned()
    }

    /// Snapshot of all records in registration order.
    pub fn records(&self) -> Vec<DownloadRecord> {
        self.lock().clone()
    }
}

//! Shared progress accounting for one download operation.
//!
//! Workers add bytes as they stream and mark their segment completed; any
//! reader can take a consistent `ProgressStats` snapshot. All access goes
//! through one mutex.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

#[derive(Debug)]
struct ProgressState {
    downloaded_bytes: u64,
    total_bytes: u64,
    completed_segments: usize,
    total_segments: usize,
    started: Instant,
}

/// Handle to the shared progress aggregate. Cloning shares the same state.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    inner: Arc<Mutex<ProgressState>>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Empty tracker (zero totals) that a caller can hold before the size is known.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ProgressState {
                downloaded_bytes: 0,
                total_bytes: 0,
                completed_segments: 0,
                total_segments: 0,
                started: Instant::now(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        // A panicking worker cannot leave the counters half-updated, so the
        // poisoned state is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a new operation: set totals, zero the counters, restart the clock.
    pub fn begin(&self, total_bytes: u64, total_segments: usize) {
        let mut s = self.lock();
        s.downloaded_bytes = 0;
        s.total_bytes = total_bytes;
        s.completed_segments = 0;
        s.total_segments = total_segments;
        s.started = Instant::now();
    }

    /// Record `n` more bytes written by a worker. Saturates at `total_bytes`.
    pub fn add_bytes(&self, n: u64) {
        let mut s = self.lock();
        s.downloaded_bytes = s.downloaded_bytes.saturating_add(n).min(s.total_bytes);
    }

    /// Record one more segment finished successfully. Saturates at `total_segments`.
    pub fn segment_completed(&self) {
        let mut s = self.lock();
        if s.completed_segments < s.total_segments {
            s.completed_segments += 1;
        }
    }

    /// Consistent copy of the current counters.
    pub fn snapshot(&self) -> ProgressStats {
        let s = self.lock();
        ProgressStats {
            bytes_done: s.downloaded_bytes,
            total_bytes: s.total_bytes,
            elapsed_secs: s.started.elapsed().as_secs_f64(),
            segments_done: s.completed_segments,
            segment_count: s.total_segments,
        }
    }
}

/// Snapshot of download progress (CLI-friendly).
#[derive(Debug, Clone)]
pub struct ProgressStats {
    /// Bytes written to segment files so far.
    pub bytes_done: u64,
    /// Total file size in bytes (0 until the size is known).
    pub total_bytes: u64,
    /// Elapsed time since the operation began (seconds).
    pub elapsed_secs: f64,
    /// Number of segments completed.
    pub segments_done: usize,
    /// Total number of segments.
    pub segment_count: usize,
}

impl ProgressStats {
    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if rate is 0).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.total_bytes.saturating_sub(self.bytes_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.bytes_done as f64 / self.total_bytes as f64).min(1.0)
    }
}

//! Error types for the download pipeline.
//!
//! `SegmentError` stays local to one worker and is collected by the
//! orchestrator; `DownloadError` aborts the whole operation.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

/// Failure of a single segment transfer. Never aborts sibling workers.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    /// Curl reported an error (timeout, connection, aborted write, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response status was not 206 Partial Content.
    #[error("HTTP {0} (expected 206 Partial Content)")]
    Http(u32),
    /// Server answered with a different span than requested.
    #[error("range mismatch: requested {expected}, server sent {got}")]
    RangeMismatch { expected: String, got: String },
    /// Transfer finished but the byte count differs from the segment length.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
    /// Writing the segment file failed.
    #[error("storage: {0}")]
    Storage(#[source] io::Error),
    /// The worker thread could not be started.
    #[error("worker failed to start: {0}")]
    Spawn(#[source] io::Error),
    /// The worker thread panicked before reporting a result.
    #[error("worker panicked")]
    Panicked,
}

/// Failure of a whole download operation.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// Remote size could not be determined; nothing was planned.
    #[error("could not determine size of {url}: {reason}")]
    SizeUnavailable { url: String, reason: String },
    /// One or more segments failed. All segments were still attempted.
    #[error("{} segment(s) failed to download: {failed:?}", failed.len())]
    SegmentTransfer { failed: Vec<usize> },
    /// Assembling the final file failed.
    #[error("merge failed at {}: {source}", path.display())]
    MergeIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Could not reserve memory for segment descriptors.
    #[error("could not allocate segment descriptors: {0}")]
    Allocation(#[from] TryReserveError),
    /// Output directory could not be created.
    #[error("could not create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DownloadError {
    pub(crate) fn size_unavailable(url: &str, reason: impl ToString) -> Self {
        DownloadError::SizeUnavailable {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn merge_io(path: &std::path::Path, source: io::Error) -> Self {
        DownloadError::MergeIo {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_transfer_lists_failed_ids() {
        let e = DownloadError::SegmentTransfer { failed: vec![1, 3] };
        assert_eq!(e.to_string(), "2 segment(s) failed to download: [1, 3]");
    }

    #[test]
    fn partial_transfer_message() {
        let e = SegmentError::PartialTransfer {
            expected: 10,
            received: 4,
        };
        assert_eq!(e.to_string(), "partial transfer: expected 10 bytes, got 4");
    }

    #[test]
    fn size_unavailable_names_url() {
        let e = DownloadError::size_unavailable("http://h/f", "HTTP 404");
        assert!(e.to_string().contains("http://h/f"));
        assert!(e.to_string().contains("HTTP 404"));
    }
}

//! Core segmented downloader engine.
//!
//! Fork-join over OS threads: one worker per segment, each fetching its byte
//! range into its own segment file. All workers are joined before anything is
//! decided; a failing segment never aborts its siblings. The caller gets one
//! typed outcome per segment, in segment-id order.

mod handler;
mod segment;

pub use segment::{fetch_range, SegmentResult};

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::error::{DownloadError, SegmentError};
use crate::progress::ProgressTracker;
use crate::segmenter::Segment;
use crate::storage::segment_path;

/// Transfer options shared by every segment request.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub connect_timeout: Duration,
    /// Total timeout for the HEAD size query. Range GETs have none.
    pub head_timeout: Duration,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            head_timeout: Duration::from_secs(30),
        }
    }
}

/// One unit of work: a planned segment plus where it comes from and goes to.
#[derive(Debug, Clone)]
pub struct SegmentTask {
    pub segment: Segment,
    pub url: String,
    pub part_path: PathBuf,
}

/// What happened to one segment.
#[derive(Debug)]
pub struct SegmentOutcome {
    pub segment: Segment,
    pub part_path: PathBuf,
    pub result: SegmentResult,
}

impl SegmentOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Builds one task per segment, with segment files next to `final_path`.
///
/// Task storage is reserved up front; failure to reserve is reported as
/// `DownloadError::Allocation` before anything is launched.
pub fn prepare_tasks(
    url: &str,
    final_path: &Path,
    segments: &[Segment],
) -> Result<Vec<SegmentTask>, DownloadError> {
    let mut tasks = Vec::new();
    tasks.try_reserve_exact(segments.len())?;
    tasks.extend(segments.iter().map(|s| SegmentTask {
        segment: *s,
        url: url.to_string(),
        part_path: segment_path(final_path, s.id),
    }));
    Ok(tasks)
}

/// Downloads every task concurrently (one thread each) and waits for all of them.
///
/// Outcomes are returned in the order of `tasks`. A worker that cannot be
/// spawned or that panics yields a failed outcome for its segment.
pub fn download_segments(
    tasks: Vec<SegmentTask>,
    progress: &ProgressTracker,
    curl: CurlOptions,
) -> Vec<SegmentOutcome> {
    let launched: Vec<_> = tasks
        .into_iter()
        .map(|task| {
            let segment = task.segment;
            let part_path = task.part_path.clone();
            let progress = progress.clone();
            let handle = thread::Builder::new()
                .name(format!("segment-{}", segment.id))
                .spawn(move || run_worker(task, &progress, curl));
            if let Err(e) = &handle {
                tracing::error!(segment = segment.id, "could not start worker: {}", e);
            }
            (segment, part_path, handle)
        })
        .collect();

    launched
        .into_iter()
        .map(|(segment, part_path, handle)| {
            let result = match handle {
                Ok(h) => h.join().unwrap_or_else(|_| {
                    tracing::error!(segment = segment.id, "worker panicked");
                    Err(SegmentError::Panicked)
                }),
                Err(e) => Err(SegmentError::Spawn(e)),
            };
            SegmentOutcome {
                segment,
                part_path,
                result,
            }
        })
        .collect()
}

fn run_worker(task: SegmentTask, progress: &ProgressTracker, curl: CurlOptions) -> SegmentResult {
    let SegmentTask {
        segment,
        url,
        part_path,
    } = task;
    tracing::debug!(
        segment = segment.id,
        range = %segment.curl_range(),
        path = %part_path.display(),
        "segment started"
    );
    let res = fetch_range(&url, &segment, &part_path, progress, curl);
    match &res {
        Ok(bytes) => {
            progress.segment_completed();
            tracing::debug!(segment = segment.id, bytes, "segment completed");
        }
        Err(e) => tracing::warn!(segment = segment.id, "segment failed: {}", e),
    }
    res
}

/// True if every segment succeeded.
pub fn all_succeeded(outcomes: &[SegmentOutcome]) -> bool {
    outcomes.iter().fold(true, |ok, o| ok && o.is_ok())
}

/// Ids of the segments that failed, in order.
pub fn failed_segments(outcomes: &[SegmentOutcome]) -> Vec<usize> {
    outcomes
        .iter()
        .filter(|o| !o.is_ok())
        .map(|o| o.segment.id)
        .collect()
}

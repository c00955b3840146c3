//! Run one segmented download: size query, plan, fan-out, join, merge.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::SplitfetchConfig;
use crate::downloader::{
    all_succeeded, download_segments, failed_segments, prepare_tasks, CurlOptions,
};
use crate::error::DownloadError;
use crate::fetch_head::query_total_size;
use crate::monitor::{Monitor, FAILED};
use crate::progress::ProgressTracker;
use crate::segmenter::{clamp_worker_count, plan_segments, segment_count_for_size};
use crate::storage::{merge_segments, PartFileGuard};
use crate::url_model::derive_filename;

/// Summary of a completed download.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub output_path: PathBuf,
    pub total_bytes: u64,
    pub segments: usize,
    pub elapsed: Duration,
}

fn curl_options(cfg: &SplitfetchConfig) -> CurlOptions {
    CurlOptions {
        connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
        head_timeout: Duration::from_secs(cfg.head_timeout_secs),
    }
}

/// Downloads `url` into `cfg.output_dir`, naming the file after the URL path.
///
/// The output path is registered with `monitor` once the size is known and
/// receives exactly one update when the operation ends. A failed size query
/// aborts before anything is registered or created.
pub fn run_download(
    url: &str,
    cfg: &SplitfetchConfig,
    monitor: &Monitor,
    progress: &ProgressTracker,
) -> Result<DownloadReport, DownloadError> {
    let curl = curl_options(cfg);

    tracing::info!(url, "querying file size");
    let total_size = query_total_size(url, curl.connect_timeout, curl.head_timeout)?;
    tracing::info!(url, total_size, "file size");

    std::fs::create_dir_all(&cfg.output_dir).map_err(|source| DownloadError::OutputDir {
        path: cfg.output_dir.clone(),
        source,
    })?;
    let output_path = cfg.output_dir.join(derive_filename(url));
    monitor.add_download(&output_path);

    let workers = segment_count_for_size(total_size, cfg);
    let result = download_sized(url, &output_path, total_size, workers, progress, curl);
    match &result {
        Ok(report) => {
            tracing::info!(
                path = %report.output_path.display(),
                bytes = report.total_bytes,
                secs = report.elapsed.as_secs_f64(),
                "download completed"
            );
            monitor.update_progress(&output_path, 100);
        }
        Err(e) => {
            tracing::error!(path = %output_path.display(), "download failed: {}", e);
            monitor.update_progress(&output_path, FAILED);
        }
    }
    result
}

/// Downloads `url` into `output_path` using `workers` concurrent segments.
///
/// `workers` is clamped to `[1, cfg.max_segments]` and to the file size. The
/// remote size is queried first; without it nothing is planned.
pub fn download_to_path(
    url: &str,
    output_path: &Path,
    workers: usize,
    cfg: &SplitfetchConfig,
    progress: &ProgressTracker,
) -> Result<DownloadReport, DownloadError> {
    let curl = curl_options(cfg);
    let workers = clamp_worker_count(workers, cfg.max_segments);

    let total_size = query_total_size(url, curl.connect_timeout, curl.head_timeout)?;
    tracing::info!(url, total_size, "file size");

    let workers = workers.min(usize::try_from(total_size).unwrap_or(usize::MAX));
    download_sized(url, output_path, total_size, workers, progress, curl)
}

fn download_sized(
    url: &str,
    output_path: &Path,
    total_size: u64,
    workers: usize,
    progress: &ProgressTracker,
    curl: CurlOptions,
) -> Result<DownloadReport, DownloadError> {
    let started = Instant::now();
    let segments = plan_segments(total_size, workers);
    let tasks = prepare_tasks(url, output_path, &segments)?;

    // From here on every exit path that is not a successful merge removes
    // the segment files.
    let guard = PartFileGuard::new(tasks.iter().map(|t| t.part_path.clone()).collect());

    progress.begin(total_size, segments.len());
    tracing::debug!(segments = segments.len(), "starting segment workers");
    let outcomes = download_segments(tasks, progress, curl);

    if !all_succeeded(&outcomes) {
        for o in outcomes.iter().filter(|o| !o.is_ok()) {
            if let Err(e) = &o.result {
                tracing::error!(segment = o.segment.id, "segment failed to download: {}", e);
            }
        }
        return Err(DownloadError::SegmentTransfer {
            failed: failed_segments(&outcomes),
        });
    }

    tracing::info!(path = %output_path.display(), "merging segments");
    let written = merge_segments(output_path, guard.paths())?;
    guard.disarm();

    Ok(DownloadReport {
        output_path: output_path.to_path_buf(),
        total_bytes: written,
        segments: segments.len(),
        elapsed: started.elapsed(),
    })
}

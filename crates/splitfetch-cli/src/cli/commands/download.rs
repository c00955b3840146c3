//! `splitfetch download <url>` – fetch one file with concurrent segments.

use anyhow::{Context, Result};
use splitfetch_core::config::SplitfetchConfig;
use splitfetch_core::monitor::Monitor;
use splitfetch_core::progress::{ProgressStats, ProgressTracker};
use splitfetch_core::scheduler;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

const PROGRESS_INTERVAL_MS: u64 = 500;

pub async fn run_download(cfg: &SplitfetchConfig, url: &str) -> Result<()> {
    println!("Getting file size for: {}", url);

    let monitor = Arc::new(Monitor::new());
    let progress = ProgressTracker::new();
    let (done_tx, done_rx) = oneshot::channel::<()>();
    let printer = tokio::spawn(report_progress(progress.clone(), done_rx));

    let result = {
        let cfg = cfg.clone();
        let url = url.to_string();
        let monitor = Arc::clone(&monitor);
        let progress = progress.clone();
        tokio::task::spawn_blocking(move || {
            scheduler::run_download(&url, &cfg, &monitor, &progress)
        })
        .await
        .context("download worker panicked")?
    };

    let _ = done_tx.send(());
    let _ = printer.await;

    for record in monitor.records() {
        tracing::debug!(path = %record.path.display(), percent = record.percent, "download record");
    }

    let report = result.with_context(|| format!("download of {} failed", url))?;
    println!(
        "Download completed successfully: {} ({} bytes, {} segments, {:.1}s)",
        report.output_path.display(),
        report.total_bytes,
        report.segments,
        report.elapsed.as_secs_f64()
    );
    Ok(())
}

/// Prints a progress line every interval until `done` fires.
async fn report_progress(progress: ProgressTracker, mut done: oneshot::Receiver<()>) {
    let mut ticker = tokio::time::interval(Duration::from_millis(PROGRESS_INTERVAL_MS));
    let mut size_shown = false;
    loop {
        tokio::select! {
            _ = &mut done => break,
            _ = ticker.tick() => {
                let stats = progress.snapshot();
                if stats.total_bytes > 0 {
                    if !size_shown {
                        println!("File size: {} bytes", stats.total_bytes);
                        size_shown = true;
                    }
                    print!("\r{}", format_progress(&stats));
                    let _ = std::io::stdout().flush();
                }
            }
        }
    }

    let stats = progress.snapshot();
    if stats.total_bytes > 0 {
        if !size_shown {
            println!("File size: {} bytes", stats.total_bytes);
        }
        println!("\r{}", format_progress(&stats));
    }
}

fn format_progress(stats: &ProgressStats) -> String {
    let done_mib = stats.bytes_done as f64 / 1_048_576.0;
    let total_mib = stats.total_bytes as f64 / 1_048_576.0;
    let pct = stats.fraction() * 100.0;
    let rate_mib = stats.bytes_per_sec() / 1_048_576.0;
    let eta = stats
        .eta_secs()
        .map(|s| format!("{:.0}s", s))
        .unwrap_or_else(|| "?".to_string());
    format!(
        "  {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {}  segments {}/{}  ",
        done_mib, total_mib, pct, rate_mib, eta, stats.segments_done, stats.segment_count
    )
}

//! Download coordinator.
//!
//! Drives one operation end to end: fetch_head → segmenter → downloader →
//! storage merge, with a single monitor update at the end.

mod run;

pub use run::{download_to_path, run_download, DownloadReport};

//! splitfetch core: download one remote file over N concurrent byte-range
//! requests and reassemble it in order.

pub mod config;
pub mod downloader;
pub mod error;
pub mod fetch_head;
pub mod logging;
pub mod monitor;
pub mod progress;
pub mod scheduler;
pub mod segmenter;
pub mod storage;
pub mod url_model;

pub use error::{DownloadError, SegmentError};

//! Single-segment HTTP Range GET into a dedicated segment file.

use std::fs::File;
use std::path::Path;

use crate::error::SegmentError;
use crate::progress::ProgressTracker;
use crate::segmenter::Segment;

use super::handler::RangeHandler;
use super::CurlOptions;

/// Result of a single segment download: bytes written on success.
pub type SegmentResult = Result<u64, SegmentError>;

/// Downloads `segment` of `url` into `part_path` (created or truncated).
///
/// The response must be `206 Partial Content` for exactly the requested span
/// and deliver `segment.len()` bytes. Bytes are reported to `progress` as they
/// are written. No retries.
pub fn fetch_range(
    url: &str,
    segment: &Segment,
    part_path: &Path,
    progress: &ProgressTracker,
    curl: CurlOptions,
) -> SegmentResult {
    let file = File::create(part_path).map_err(SegmentError::Storage)?;
    let handler = RangeHandler::new(*segment, file, progress.clone());

    let mut easy = curl::easy::Easy2::new(handler);
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.connect_timeout(curl.connect_timeout)?;
    easy.range(&segment.curl_range())?;

    let performed = easy.perform();
    let code = easy.response_code().unwrap_or(0);
    let handler = easy.get_mut();

    if let Some(rejected) = handler.rejection.take() {
        return Err(rejected);
    }
    if let Err(e) = performed {
        if e.is_write_error() {
            if let Some(io_err) = handler.storage_error.take() {
                return Err(SegmentError::Storage(io_err));
            }
        }
        return Err(SegmentError::Curl(e));
    }
    if code != 206 {
        return Err(SegmentError::Http(code));
    }

    handler.finish().map_err(SegmentError::Storage)?;

    let received = handler.bytes_written;
    let expected = segment.len();
    if received != expected {
        return Err(SegmentError::PartialTransfer { expected, received });
    }

    Ok(received)
}

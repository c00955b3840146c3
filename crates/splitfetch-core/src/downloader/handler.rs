//! Easy2 Handler for one segment transfer.
//! Validates 206 and Content-Range before writing; streams the body into the segment file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str;

use crate::error::SegmentError;
use crate::progress::ProgressTracker;
use crate::segmenter::Segment;

const WRITE_BUF_SIZE: usize = 128 * 1024;

/// Handler state for one segment transfer. Implements curl's Handler for Easy2.
pub(super) struct RangeHandler {
    segment: Segment,
    writer: BufWriter<File>,
    progress: ProgressTracker,
    response_headers: Vec<String>,
    /// None = not yet checked; Some(true) = 206 + matching range; Some(false) = abort.
    range_ok: Option<bool>,
    /// Why the response was rejected, if it was.
    pub(super) rejection: Option<SegmentError>,
    /// Local write failure that made curl abort the transfer.
    pub(super) storage_error: Option<io::Error>,
    pub(super) bytes_written: u64,
}

impl RangeHandler {
    pub(super) fn new(segment: Segment, file: File, progress: ProgressTracker) -> Self {
        Self {
            segment,
            writer: BufWriter::with_capacity(WRITE_BUF_SIZE, file),
            progress,
            response_headers: Vec::new(),
            range_ok: None,
            rejection: None,
            storage_error: None,
            bytes_written: 0,
        }
    }

    /// Flush buffered data and sync the segment file.
    pub(super) fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()
    }

    fn check_response(&mut self) -> bool {
        match parse_http_status(&self.response_headers) {
            Some(206) => {}
            Some(code) => {
                self.rejection = Some(SegmentError::Http(code));
                return false;
            }
            None => {
                self.rejection = Some(SegmentError::Http(0));
                return false;
            }
        }
        if let Some((start, end)) = parse_content_range(&self.response_headers) {
            if start != self.segment.start || end != self.segment.end {
                self.rejection = Some(SegmentError::RangeMismatch {
                    expected: format!("{}-{}", self.segment.start, self.segment.end),
                    got: format!("{}-{}", start, end),
                });
                return false;
            }
        }
        true
    }
}

impl curl::easy::Handler for RangeHandler {
    fn header(&mut self, data: &[u8]) -> bool {
        if let Ok(s) = str::from_utf8(data) {
            let line = s.trim_end();
            if line.starts_with("HTTP/") {
                self.response_headers.clear();
            }
            self.response_headers.push(line.to_string());
        }
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, curl::easy::WriteError> {
        if self.range_ok.is_none() {
            let ok = self.check_response();
            self.range_ok = Some(ok);
        }
        if self.range_ok == Some(false) {
            return Ok(0);
        }
        match self.writer.write_all(data) {
            Ok(()) => {
                let n = data.len();
                self.bytes_written += n as u64;
                self.progress.add_bytes(n as u64);
                Ok(n)
            }
            Err(e) => {
                self.storage_error = Some(e);
                Ok(0)
            }
        }
    }
}

/// Status code of the last response in `lines` (e.g. 206 from `HTTP/1.1 206 Partial Content`).
pub(super) fn parse_http_status(lines: &[String]) -> Option<u32> {
    lines
        .iter()
        .rev()
        .find(|l| l.starts_with("HTTP/"))
        .and_then(|l| l.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
}

/// Inclusive span from `Content-Range: bytes start-end/total`.
pub(super) fn parse_content_range(lines: &[String]) -> Option<(u64, u64)> {
    lines.iter().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if !name.trim().eq_ignore_ascii_case("content-range") {
            return None;
        }
        let spec = value.trim().strip_prefix("bytes")?.trim();
        let span = spec.split('/').next()?;
        let (a, b) = span.split_once('-')?;
        Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
    })
}

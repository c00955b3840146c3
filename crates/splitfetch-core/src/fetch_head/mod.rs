//! HTTP HEAD / metadata probing.
//!
//! Uses the curl crate (libcurl) to fetch response headers and read the
//! remote size from `Content-Length`. No segmentation happens without it.

mod parse;

use anyhow::{Context, Result};
use std::str;
use std::time::Duration;

use crate::error::DownloadError;

/// Result of a HEAD request: headers needed to plan a segmented download.
#[derive(Debug, Clone)]
pub struct HeadResult {
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// True if server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects; only the headers of the final response are parsed.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn probe(url: &str, connect_timeout: Duration, timeout: Duration) -> Result<HeadResult> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(connect_timeout)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                let line = s.trim_end();
                if line.starts_with("HTTP/") {
                    headers.clear();
                }
                headers.push(line.to_string());
            }
            true
        })?;
        transfer.perform().context("HEAD request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("HEAD {} returned HTTP {}", url, code);
    }

    Ok(parse::parse_headers(&headers))
}

/// Returns the remote file's size in bytes.
///
/// Fails with `DownloadError::SizeUnavailable` if the request fails, the
/// status is not 2xx, or the server reports no (or a zero) size.
pub fn query_total_size(
    url: &str,
    connect_timeout: Duration,
    timeout: Duration,
) -> Result<u64, DownloadError> {
    let head = probe(url, connect_timeout, timeout)
        .map_err(|e| DownloadError::size_unavailable(url, format!("{:#}", e)))?;
    if !head.accept_ranges {
        tracing::debug!(url, "server did not advertise Accept-Ranges: bytes");
    }
    match head.content_length {
        Some(0) => Err(DownloadError::size_unavailable(url, "server reported size 0")),
        Some(n) => Ok(n),
        None => Err(DownloadError::size_unavailable(url, "no Content-Length in response")),
    }
}

//! Segment type and range planning.

/// A single segment: inclusive byte range `[start, end]` of the source file.
///
/// `id` is the segment's position in the plan and fixes the merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub id: usize,
    /// First byte offset (inclusive).
    pub start: u64,
    /// Last byte offset (inclusive).
    pub end: u64,
}

impl Segment {
    /// Length of this segment in bytes.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Range in the form curl expects for `CURLOPT_RANGE`: `start-end`.
    pub fn curl_range(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

}

/// Builds a segment plan for `total_size` bytes split across `worker_count` workers.
///
/// Every segment but the last gets `total_size / worker_count` bytes; the last
/// one absorbs the remainder of the integer division. Returns an empty vec if
/// either input is 0. More workers than bytes yields one single-byte segment
/// per byte.
pub fn plan_segments(total_size: u64, worker_count: usize) -> Vec<Segment> {
    if total_size == 0 || worker_count == 0 {
        return Vec::new();
    }

    let count = (worker_count as u64).min(total_size);
    let base = total_size / count;

    (0..count)
        .map(|i| {
            let start = i * base;
            let end = if i == count - 1 {
                total_size - 1
            } else {
                (i + 1) * base - 1
            };
            Segment {
                id: i as usize,
                start,
                end,
            }
        })
        .collect()
}

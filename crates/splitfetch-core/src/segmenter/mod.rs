//! Range math and segment planning.
//!
//! Splits a download into N contiguous inclusive byte ranges (one per worker)
//! and picks the worker count from the file size.

mod count;
mod range;

pub use count::{clamp_worker_count, segment_count_for_size};
pub use range::{plan_segments, Segment};

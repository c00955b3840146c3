//! Segment count selection (size thresholds and config caps).

use crate::config::SplitfetchConfig;

/// Clamps a requested worker count to `[1, max]`.
pub fn clamp_worker_count(requested: usize, max: usize) -> usize {
    requested.min(max).max(1)
}

/// Chooses how many segments to split a file of `total_size` bytes into.
///
/// Small files get one segment, medium files `reduced_segments`, everything
/// else `max_segments`. Never more segments than bytes.
pub fn segment_count_for_size(total_size: u64, cfg: &SplitfetchConfig) -> usize {
    let n = if total_size < cfg.single_segment_below {
        1
    } else if total_size < cfg.reduced_segments_below {
        cfg.reduced_segments
    } else {
        cfg.max_segments
    };
    let n = clamp_worker_count(n, cfg.max_segments);
    if total_size == 0 {
        return n;
    }
    n.min(usize::try_from(total_size).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_worker_count(0, 8), 1);
        assert_eq!(clamp_worker_count(3, 8), 3);
        assert_eq!(clamp_worker_count(64, 8), 8);
    }

    #[test]
    fn thresholds() {
        let cfg = SplitfetchConfig::default();
        assert_eq!(segment_count_for_size(512 * 1024, &cfg), 1);
        assert_eq!(segment_count_for_size(MIB, &cfg), 4);
        assert_eq!(segment_count_for_size(5 * MIB, &cfg), 4);
        assert_eq!(segment_count_for_size(10 * MIB, &cfg), 8);
        assert_eq!(segment_count_for_size(4096 * MIB, &cfg), 8);
    }

    #[test]
    fn reduced_count_capped_by_max() {
        let cfg = SplitfetchConfig {
            max_segments: 2,
            ..SplitfetchConfig::default()
        };
        assert_eq!(segment_count_for_size(5 * MIB, &cfg), 2);
    }

    #[test]
    fn never_more_segments_than_bytes() {
        let cfg = SplitfetchConfig {
            single_segment_below: 0,
            reduced_segments_below: 0,
            ..SplitfetchConfig::default()
        };
        assert_eq!(segment_count_for_size(3, &cfg), 3);
    }
}

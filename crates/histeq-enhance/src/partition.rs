//! Row partitioning for the parallel phases

use std::ops::Range;

/// Split `height` rows into at most `workers` contiguous ranges.
///
/// Range sizes differ by at most one row, the larger ranges come first,
/// and together the ranges cover `0..height` without overlap. When there
/// are more workers than rows, each row gets its own range and the
/// remaining workers get nothing. Returns an empty list for `height == 0`
/// or `workers == 0`.
///
/// # Examples
///
/// ```
/// use histeq_enhance::partition_rows;
///
/// assert_eq!(partition_rows(10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(partition_rows(2, 5), vec![0..1, 1..2]);
/// ```
pub fn partition_rows(height: u32, workers: usize) -> Vec<Range<u32>> {
    if height == 0 || workers == 0 {
        return Vec::new();
    }
    let parts = workers.min(height as usize) as u32;
    let base = height / parts;
    let extra = height % parts;

    let mut ranges = Vec::with_capacity(parts as usize);
    let mut start = 0u32;
    for i in 0..parts {
        let len = base + u32::from(i < extra);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Rows per band when `height` rows are cut into `workers` equal bands.
///
/// The last band may be shorter. Always at least 1.
pub(crate) fn band_rows(height: u32, workers: usize) -> usize {
    (height as usize).div_ceil(workers.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_cover(height: u32, workers: usize) {
        let ranges = partition_rows(height, workers);
        assert!(ranges.len() <= workers);
        let mut next = 0;
        for r in &ranges {
            assert_eq!(r.start, next, "gap or overlap at {next}");
            assert!(r.end > r.start, "empty range");
            next = r.end;
        }
        assert_eq!(next, height);
        if let (Some(min), Some(max)) = (
            ranges.iter().map(|r| r.len()).min(),
            ranges.iter().map(|r| r.len()).max(),
        ) {
            assert!(max - min <= 1, "uneven split {min}..{max}");
        }
    }

    #[test]
    fn test_partition_covers_rows() {
        for height in [1u32, 2, 7, 64, 100, 1001] {
            for workers in [1usize, 2, 3, 4, 8, 13, 2000] {
                check_cover(height, workers);
            }
        }
    }

    #[test]
    fn test_partition_empty() {
        assert!(partition_rows(0, 4).is_empty());
        assert!(partition_rows(10, 0).is_empty());
    }

    #[test]
    fn test_partition_single_worker() {
        assert_eq!(partition_rows(17, 1), vec![0..17]);
    }

    #[test]
    fn test_band_rows() {
        assert_eq!(band_rows(10, 3), 4);
        assert_eq!(band_rows(10, 20), 1);
        assert_eq!(band_rows(0, 4), 1);
    }
}

//! 256-bin intensity histogram
//!
//! One counter per possible 8-bit sample value. Counters are `u64` so
//! that the sum over any image that fits in memory cannot overflow.

use std::ops::Index;

/// Number of distinct 8-bit levels.
pub const LEVELS: usize = 256;

/// Per-level sample counts for one channel.
///
/// # Examples
///
/// ```
/// use histeq_core::Histogram;
///
/// let hist: Histogram = [0u8, 0, 7, 255].into_iter().collect();
/// assert_eq!(hist.get(0), 2);
/// assert_eq!(hist.total(), 4);
/// assert_eq!(hist.min_level(), Some(0));
/// assert_eq!(hist.max_level(), Some(255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Create an empty histogram (all counters zero).
    pub const fn new() -> Self {
        Histogram {
            counts: [0; LEVELS],
        }
    }

    /// Wrap precomputed counts.
    pub const fn from_counts(counts: [u64; LEVELS]) -> Self {
        Histogram { counts }
    }

    /// Count one occurrence of `level`.
    #[inline]
    pub fn increment(&mut self, level: u8) {
        self.counts[level as usize] += 1;
    }

    /// Add every counter of `other` into `self`.
    ///
    /// Element-wise addition is commutative and associative, so merging
    /// partial histograms in any order gives the same result.
    pub fn merge(&mut self, other: &Histogram) {
        for (dst, &src) in self.counts.iter_mut().zip(other.counts.iter()) {
            *dst += src;
        }
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Count for one level.
    #[inline]
    pub fn get(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// All counters, indexed by level.
    #[inline]
    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Running sums: entry `i` is the number of samples `<= i`.
    pub fn cumulative(&self) -> [u64; LEVELS] {
        let mut out = [0u64; LEVELS];
        let mut acc = 0u64;
        for (dst, &count) in out.iter_mut().zip(self.counts.iter()) {
            acc += count;
            *dst = acc;
        }
        out
    }

    /// Lowest level with a non-zero count.
    pub fn min_level(&self) -> Option<u8> {
        self.counts.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Highest level with a non-zero count.
    pub fn max_level(&self) -> Option<u8> {
        self.counts.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Level with the largest count (lowest level wins ties).
    pub fn mode(&self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let mut best = 0usize;
        for (i, &c) in self.counts.iter().enumerate() {
            if c > self.counts[best] {
                best = i;
            }
        }
        Some(best as u8)
    }

    /// Mean level, or `None` for an empty histogram.
    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &c)| i as f64 * c as f64)
            .sum();
        Some(weighted / total as f64)
    }

    /// True if every counter is zero.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl Index<u8> for Histogram {
    type Output = u64;

    fn index(&self, level: u8) -> &u64 {
        &self.counts[level as usize]
    }
}

impl Index<usize> for Histogram {
    type Output = u64;

    fn index(&self, level: usize) -> &u64 {
        &self.counts[level]
    }
}

impl Extend<u8> for Histogram {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        for level in iter {
            self.increment(level);
        }
    }
}

impl FromIterator<u8> for Histogram {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut hist = Histogram::new();
        hist.extend(iter);
        hist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let hist = Histogram::new();
        assert!(hist.is_empty());
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.min_level(), None);
        assert_eq!(hist.mode(), None);
        assert_eq!(hist.mean(), None);
    }

    #[test]
    fn test_increment_and_index() {
        let mut hist = Histogram::new();
        hist.increment(3);
        hist.increment(3);
        hist.increment(200);
        assert_eq!(hist[3u8], 2);
        assert_eq!(hist[200usize], 1);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.mode(), Some(3));
    }

    #[test]
    fn test_merge_commutes() {
        let a: Histogram = [1u8, 2, 2, 9].into_iter().collect();
        let b: Histogram = [2u8, 255].into_iter().collect();

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(ab.total(), 6);
        assert_eq!(ab.get(2), 3);
    }

    #[test]
    fn test_cumulative() {
        let hist: Histogram = [0u8, 1, 1, 3].into_iter().collect();
        let cdf = hist.cumulative();
        assert_eq!(&cdf[..5], &[1, 3, 3, 4, 4]);
        assert_eq!(cdf[255], 4);
    }

    #[test]
    fn test_min_max_mean() {
        let hist: Histogram = [10u8, 20, 30].into_iter().collect();
        assert_eq!(hist.min_level(), Some(10));
        assert_eq!(hist.max_level(), Some(30));
        assert_eq!(hist.mean(), Some(20.0));
    }
}

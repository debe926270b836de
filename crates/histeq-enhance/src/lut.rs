//! Lookup table construction
//!
//! Converts a histogram into an equalizing level map by scaling its
//! cumulative distribution onto `[0, 255]`.

use crate::{EnhanceError, EnhanceResult};
use histeq_core::{Histogram, LEVELS, LookupTable};

/// Highest output level.
const MAX_LEVEL: u128 = 255;

/// Build the equalizing lookup table for `histogram`.
///
/// Scans levels 0 to 255 on the calling thread, keeping a running count
/// `curr`, and sets `table[i] = round(curr * 255 / total_pixels)` with
/// halves rounded away from zero. The arithmetic is done in integers, so
/// the result is exact for any pixel total.
///
/// The table is non-decreasing, and `table[255] == 255` whenever the
/// histogram sums to `total_pixels`.
///
/// # Errors
///
/// - [`EnhanceError::ZeroPixelCount`] if `total_pixels == 0`
/// - [`EnhanceError::HistogramExceedsTotal`] if the histogram holds more
///   samples than `total_pixels`
///
/// # Examples
///
/// ```
/// use histeq_core::Histogram;
/// use histeq_enhance::build_lut;
///
/// let hist: Histogram = [10u8, 10, 20, 30].into_iter().collect();
/// let lut = build_lut(&hist, 4).unwrap();
/// assert_eq!(lut.map(10), 128);
/// assert_eq!(lut.map(20), 191);
/// assert_eq!(lut.map(30), 255);
/// ```
pub fn build_lut(histogram: &Histogram, total_pixels: u64) -> EnhanceResult<LookupTable> {
    if total_pixels == 0 {
        return Err(EnhanceError::ZeroPixelCount);
    }
    let total = u128::from(total_pixels);

    let mut table = [0u8; LEVELS];
    let mut curr: u128 = 0;
    for (level, entry) in table.iter_mut().enumerate() {
        curr += u128::from(histogram[level]);
        if curr > total {
            return Err(EnhanceError::HistogramExceedsTotal {
                cumulative: u64::try_from(curr).unwrap_or(u64::MAX),
                total: total_pixels,
            });
        }
        // floor((2 * curr * 255 + total) / (2 * total)) == round-half-up
        *entry = ((2 * curr * MAX_LEVEL + total) / (2 * total)) as u8;
    }

    Ok(LookupTable::from_array(table))
}

//! Parallel level remapping
//!
//! Applies a lookup table to one channel of every pixel. The destination
//! is cut into fixed-size row bands, one per task, so each task owns a
//! disjoint slice and no locking is needed. Channels other than the
//! selected one are copied through unchanged; the destination is always
//! fully written.

use crate::EnhanceResult;
use crate::config::check_workers;
use crate::partition::band_rows;
use histeq_core::{Channel, Image, LookupTable};
use rayon::prelude::*;

/// Map the selected channel of `band` in place.
#[inline]
fn map_band(band: &mut [u8], lut: &LookupTable, offset: usize, channels: usize) {
    for sample in band.iter_mut().skip(offset).step_by(channels) {
        *sample = lut.map(*sample);
    }
}

/// Apply `lut` to one channel of `source`, producing a new image.
///
/// The result has the same shape as `source`. For every pixel the
/// selected channel holds `lut[source sample]` and all other channels hold
/// the source bytes unchanged. `source` is not modified.
///
/// # Errors
///
/// Returns [`EnhanceError::InvalidWorkerCount`](crate::EnhanceError::InvalidWorkerCount)
/// if `workers < 1`, or a core error if `channel` is out of range.
///
/// # Examples
///
/// ```
/// use histeq_core::{Channel, Image, LookupTable};
/// use histeq_enhance::remap;
///
/// let mut levels = [0u8; 256];
/// levels[5] = 200;
/// let lut = LookupTable::from_array(levels);
///
/// let src = Image::from_raw(1, 1, 2, vec![5, 5]).unwrap();
/// let dst = remap(&src, &lut, Channel::FIRST, 1).unwrap();
/// assert_eq!(dst.data(), &[200, 5]);
/// ```
pub fn remap(
    source: &Image,
    lut: &LookupTable,
    channel: Channel,
    workers: usize,
) -> EnhanceResult<Image> {
    check_workers(workers)?;
    source.check_channel(channel)?;

    let mut dest = source.new_like();
    if source.is_empty() {
        return Ok(dest);
    }

    let band = band_rows(source.height(), workers) * source.row_stride();
    let channels = source.channels() as usize;
    let offset = channel.index();

    dest.data_mut()
        .par_chunks_mut(band)
        .zip(source.data().par_chunks(band))
        .for_each(|(dst, src)| {
            dst.copy_from_slice(src);
            map_band(dst, lut, offset, channels);
        });

    Ok(dest)
}

/// Apply `lut` to one channel of `image` in place.
///
/// Same partitioning and guarantees as [`remap`], without allocating a
/// destination buffer.
pub fn remap_in_place(
    image: &mut Image,
    lut: &LookupTable,
    channel: Channel,
    workers: usize,
) -> EnhanceResult<()> {
    check_workers(workers)?;
    image.check_channel(channel)?;
    if image.is_empty() {
        return Ok(());
    }

    let band = band_rows(image.height(), workers) * image.row_stride();
    let channels = image.channels() as usize;
    let offset = channel.index();

    image
        .data_mut()
        .par_chunks_mut(band)
        .for_each(|dst| map_band(dst, lut, offset, channels));

    Ok(())
}

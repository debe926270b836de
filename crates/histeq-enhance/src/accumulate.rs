//! Parallel histogram accumulation
//!
//! Rows are split into contiguous ranges, one per worker. Each worker
//! counts its range into a private histogram that no other worker can
//! see, then folds it into the shared result while holding the lock.
//! The lock covers only the 256-wide merge, never the per-pixel counting.

use crate::config::check_workers;
use crate::partition::partition_rows;
use crate::EnhanceResult;
use histeq_core::{Channel, Histogram, Image};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};
use tracing::trace;

/// Count the levels of one channel over the whole image.
///
/// The counters of the result sum to `width * height`. The result does
/// not depend on `workers` or on the order in which workers merge.
///
/// Runs on the current rayon pool; [`Equalizer`](crate::Equalizer)
/// installs a pool of the configured size before calling this.
///
/// # Errors
///
/// Returns [`EnhanceError::InvalidWorkerCount`](crate::EnhanceError::InvalidWorkerCount)
/// if `workers < 1`, or a core error if `channel` is out of range.
///
/// # Examples
///
/// ```
/// use histeq_core::{Channel, Image};
/// use histeq_enhance::accumulate;
///
/// let img = Image::from_raw(2, 2, 1, vec![0, 0, 9, 255]).unwrap();
/// let hist = accumulate(&img, Channel::FIRST, 2).unwrap();
/// assert_eq!(hist.get(0), 2);
/// assert_eq!(hist.total(), 4);
/// ```
pub fn accumulate(image: &Image, channel: Channel, workers: usize) -> EnhanceResult<Histogram> {
    check_workers(workers)?;
    image.check_channel(channel)?;

    let stride = image.row_stride();
    let channels = image.channels() as usize;
    let offset = channel.index();
    let data = image.data();

    let global = Mutex::new(Histogram::new());

    partition_rows(image.height(), workers)
        .into_par_iter()
        .for_each(|rows| {
            let mut local = Histogram::new();
            let band = &data[rows.start as usize * stride..rows.end as usize * stride];
            for &sample in band.iter().skip(offset).step_by(channels) {
                local.increment(sample);
            }

            // merge is a plain array add; a poisoned lock holds whole counts
            let mut hist = global.lock().unwrap_or_else(PoisonError::into_inner);
            hist.merge(&local);
            trace!(rows = ?rows, "merged partial histogram");
        });

    Ok(global.into_inner().unwrap_or_else(PoisonError::into_inner))
}

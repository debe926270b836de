//! Equalization orchestrator
//!
//! Runs the three phases in a fixed order on a bounded worker pool:
//!
//! 1. [`accumulate`] - parallel histogram of the selected channel
//! 2. [`build_lut`] - sequential lookup table construction
//! 3. [`remap`] - parallel application of the table
//!
//! Each parallel phase is a fork-join: the call returns only after every
//! worker has finished, so phase 2 always sees the complete histogram and
//! phase 3 always sees the complete table.

use crate::config::EqualizeOptions;
use crate::{EnhanceError, EnhanceResult, accumulate, build_lut, remap, remap_in_place};
use histeq_core::{Channel, Histogram, Image, LookupTable};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;
use tracing::{debug, debug_span};

/// Intermediate results of one equalization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualizeReport {
    /// Histogram of the selected channel of the source image
    pub histogram: Histogram,
    /// Table applied to the selected channel
    pub lut: LookupTable,
}

/// Histogram equalizer bound to a worker pool.
///
/// The pool is created once and reused for every image. Separate
/// equalizers own separate pools, so different degrees of parallelism
/// can be used side by side in one process.
///
/// # Examples
///
/// ```
/// use histeq_core::Image;
/// use histeq_enhance::{EqualizeOptions, Equalizer};
///
/// let img = Image::from_raw(4, 1, 1, vec![10, 10, 20, 30]).unwrap();
/// let eq = Equalizer::new(EqualizeOptions::default().with_workers(2)).unwrap();
/// let out = eq.equalize(&img).unwrap();
/// assert_eq!(out.data(), &[128, 128, 191, 255]);
/// ```
pub struct Equalizer {
    options: EqualizeOptions,
    pool: ThreadPool,
}

impl std::fmt::Debug for Equalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Equalizer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Equalizer {
    /// Validate `options` and start a pool of `options.workers` threads.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::InvalidWorkerCount`] for a zero worker count
    /// and [`EnhanceError::ThreadPool`] if the threads cannot be spawned.
    pub fn new(options: EqualizeOptions) -> EnhanceResult<Self> {
        options.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(options.workers)
            .thread_name(|i| format!("histeq-worker-{i}"))
            .build()
            .map_err(|e| EnhanceError::ThreadPool(e.to_string()))?;
        Ok(Equalizer { options, pool })
    }

    /// Options this equalizer was built with.
    pub fn options(&self) -> &EqualizeOptions {
        &self.options
    }

    /// Number of workers used by the parallel phases.
    pub fn workers(&self) -> usize {
        self.options.workers
    }

    /// Equalize the configured channel of `image`.
    ///
    /// Returns a new image of the same shape; `image` is left untouched.
    ///
    /// # Errors
    ///
    /// - core error if the configured channel is out of range
    /// - [`EnhanceError::ZeroPixelCount`] if the image has no pixels
    pub fn equalize(&self, image: &Image) -> EnhanceResult<Image> {
        self.equalize_with_report(image).map(|(out, _)| out)
    }

    /// Equalize the configured channel and also return the histogram and
    /// lookup table that were used.
    pub fn equalize_with_report(&self, image: &Image) -> EnhanceResult<(Image, EqualizeReport)> {
        self.equalize_channel(image, self.options.channel)
    }

    /// Equalize an explicitly given channel.
    pub fn equalize_channel(
        &self,
        image: &Image,
        channel: Channel,
    ) -> EnhanceResult<(Image, EqualizeReport)> {
        image.check_channel(channel)?;
        let workers = self.options.workers;

        let span = debug_span!(
            "equalize",
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            channel = channel.index(),
            workers
        );
        let _enter = span.enter();

        let start = Instant::now();
        let histogram = self
            .pool
            .install(|| accumulate(image, channel, workers))?;
        debug!(
            elapsed = ?start.elapsed(),
            mode = ?histogram.mode(),
            mean = ?histogram.mean(),
            "histogram accumulated"
        );

        let start = Instant::now();
        let lut = build_lut(&histogram, image.pixel_count())?;
        debug!(elapsed = ?start.elapsed(), "lookup table built");

        let start = Instant::now();
        let output = self
            .pool
            .install(|| remap(image, &lut, channel, workers))?;
        debug!(elapsed = ?start.elapsed(), "levels remapped");

        Ok((output, EqualizeReport { histogram, lut }))
    }

    /// Equalize every color channel independently.
    ///
    /// Each channel gets its own histogram and table. For 2- and
    /// 4-channel images the last channel is treated as alpha and copied
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::ZeroPixelCount`] if the image has no pixels.
    pub fn equalize_all_channels(&self, image: &Image) -> EnhanceResult<Image> {
        let channels = image.channels() as usize;
        let color_channels = match channels {
            2 | 4 => channels - 1,
            n => n,
        };
        let workers = self.options.workers;

        let mut output = image.clone();
        for c in 0..color_channels {
            let channel = Channel::new(c);
            let histogram = self
                .pool
                .install(|| accumulate(image, channel, workers))?;
            let lut = build_lut(&histogram, image.pixel_count())?;
            self.pool
                .install(|| remap_in_place(&mut output, &lut, channel, workers))?;
            debug!(channel = c, "channel equalized");
        }
        Ok(output)
    }
}

/// Equalize one channel of `image` with a one-shot pool of `workers` threads.
///
/// # Errors
///
/// See [`Equalizer::new`] and [`Equalizer::equalize`].
pub fn equalize(image: &Image, channel: Channel, workers: usize) -> EnhanceResult<Image> {
    let options = EqualizeOptions { channel, workers };
    Equalizer::new(options)?.equalize(image)
}

/// Equalize every color channel of `image` independently.
///
/// See [`Equalizer::equalize_all_channels`].
pub fn equalize_all_channels(image: &Image, workers: usize) -> EnhanceResult<Image> {
    let options = EqualizeOptions::default().with_workers(workers);
    Equalizer::new(options)?.equalize_all_channels(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equalizer(workers: usize) -> Equalizer {
        Equalizer::new(EqualizeOptions::default().with_workers(workers)).unwrap()
    }

    #[test]
    fn test_uniform_image_goes_white() {
        let img = Image::from_raw(8, 8, 1, vec![77; 64]).unwrap();
        let (out, report) = equalizer(3).equalize_with_report(&img).unwrap();
        assert_eq!(report.histogram.get(77), 64);
        assert_eq!(report.histogram.total(), 64);
        assert_eq!(report.lut.map(77), 255);
        assert!(out.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_empty_image_fails_in_lut_phase() {
        let img = Image::new(0, 4, 1).unwrap();
        assert!(matches!(
            equalizer(2).equalize(&img),
            Err(EnhanceError::ZeroPixelCount)
        ));
        let img = Image::new(4, 0, 3).unwrap();
        assert!(matches!(
            equalize(&img, Channel::FIRST, 1),
            Err(EnhanceError::ZeroPixelCount)
        ));
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(matches!(
            Equalizer::new(EqualizeOptions::default().with_workers(0)),
            Err(EnhanceError::InvalidWorkerCount(0))
        ));
    }

    #[test]
    fn test_bad_channel_rejected_before_work() {
        let img = Image::new(2, 2, 1).unwrap();
        let eq = Equalizer::new(
            EqualizeOptions::default()
                .with_workers(1)
                .with_channel(Channel::new(1)),
        )
        .unwrap();
        assert!(matches!(eq.equalize(&img), Err(EnhanceError::Core(_))));
    }

    #[test]
    fn test_all_channels_keeps_alpha() {
        let mut data = Vec::new();
        for i in 0..16u8 {
            data.extend_from_slice(&[i, 100 + i, 200 - i, 42]);
        }
        let img = Image::from_raw(4, 4, 4, data).unwrap();
        let out = equalizer(2).equalize_all_channels(&img).unwrap();
        for (s, d) in img.data().chunks_exact(4).zip(out.data().chunks_exact(4)) {
            assert_eq!(d[3], s[3]);
        }
        // 16 distinct red levels: level i maps to round((i + 1) * 255 / 16)
        let reds: Vec<u8> = out.channel_samples(Channel::FIRST).unwrap().collect();
        assert_eq!(reds[15], 255);
        assert_eq!(reds[0], 16);
    }

    #[test]
    fn test_reentrant_pools() {
        let img = Image::from_raw(4, 1, 1, vec![1, 2, 3, 4]).unwrap();
        let a = equalizer(1);
        let b = equalizer(4);
        assert_eq!(a.equalize(&img).unwrap(), b.equalize(&img).unwrap());
    }
}

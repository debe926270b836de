//! Equalization options
//!
//! The degree of parallelism is chosen once by the caller and passed down
//! explicitly to every phase; nothing here is process-global.

use crate::{EnhanceError, EnhanceResult};
use histeq_core::Channel;
use std::num::NonZeroUsize;

/// Worker count derived from the available hardware parallelism.
///
/// Falls back to 1 when the platform cannot report it.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

pub(crate) fn check_workers(workers: usize) -> EnhanceResult<()> {
    if workers < 1 {
        return Err(EnhanceError::InvalidWorkerCount(workers));
    }
    Ok(())
}

/// Options for an [`Equalizer`](crate::Equalizer) run.
///
/// # Examples
///
/// ```
/// use histeq_core::Channel;
/// use histeq_enhance::EqualizeOptions;
///
/// let opts = EqualizeOptions::default()
///     .with_channel(Channel::new(1))
///     .with_workers(4);
/// assert_eq!(opts.workers, 4);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualizeOptions {
    /// Channel whose histogram drives the remap
    pub channel: Channel,
    /// Size of the worker pool for the parallel phases
    pub workers: usize,
}

impl Default for EqualizeOptions {
    fn default() -> Self {
        EqualizeOptions {
            channel: Channel::FIRST,
            workers: default_workers(),
        }
    }
}

impl EqualizeOptions {
    /// Select the channel to equalize.
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Set the worker pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Check the options that can be checked without an image.
    ///
    /// # Errors
    ///
    /// Returns [`EnhanceError::InvalidWorkerCount`] if `workers < 1`.
    pub fn validate(&self) -> EnhanceResult<()> {
        check_workers(self.workers)
    }
}

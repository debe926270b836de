//! Error types for histeq-enhance
//!
//! All variants are caller errors detected at the entry of a phase.
//! None of them is retried and no partial output is ever returned.

use thiserror::Error;

/// Errors that can occur while equalizing an image
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// Core library error (bad channel, malformed buffer or table)
    #[error("core error: {0}")]
    Core(#[from] histeq_core::Error),

    /// Worker count below 1
    #[error("invalid worker count: {0} (must be >= 1)")]
    InvalidWorkerCount(usize),

    /// Lookup table requested for an image without pixels
    #[error("cannot build a lookup table from zero pixels")]
    ZeroPixelCount,

    /// Histogram holds more samples than the stated pixel total
    #[error("cumulative count {cumulative} exceeds pixel total {total}")]
    HistogramExceedsTotal {
        /// Running count at the point it passed the total
        cumulative: u64,
        /// Pixel total passed by the caller
        total: u64,
    },

    /// The worker pool could not be started
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Result type for equalization operations
pub type EnhanceResult<T> = Result<T, EnhanceError>;

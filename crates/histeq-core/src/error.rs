//! Error types for histeq-core
//!
//! Provides a unified error type for the image buffer, histogram and
//! lookup table types. The range variants are raised at the boundary
//! constructors that accept externally supplied data; inside the typed
//! API those conditions cannot occur.

use thiserror::Error;

/// histeq-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Channel count of zero
    #[error("invalid channel count: {0} (must be >= 1)")]
    InvalidChannelCount(u32),

    /// Channel selector outside the pixel
    #[error("channel {channel} out of range for {channels}-channel image")]
    InvalidChannel { channel: usize, channels: u32 },

    /// Sample buffer length disagrees with the declared shape
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Image dimensions whose sample count does not fit in memory
    #[error("image too large: {width}x{height}x{channels}")]
    ImageTooLarge {
        width: u32,
        height: u32,
        channels: u32,
    },

    /// Externally supplied sample outside [0, 255]
    #[error("sample {value} at index {index} out of range [0, 255]")]
    SampleOutOfRange { index: usize, value: i64 },

    /// Lookup table with fewer than 256 entries
    #[error("lookup table too short: {len} entries (need 256)")]
    LookupTableTooShort { len: usize },

    /// Lookup table entry outside [0, 255]
    #[error("lookup table level {value} at index {index} out of range [0, 255]")]
    LevelOutOfRange { index: usize, value: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for histeq-core operations
pub type Result<T> = std::result::Result<T, Error>;

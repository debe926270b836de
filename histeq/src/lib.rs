//! histeq - Parallel histogram equalization for Rust
//!
//! Histogram equalization remaps the intensities of one image channel so
//! that their cumulative distribution approaches a linear ramp, spreading
//! a narrow band of levels across the full 0..=255 range.
//!
//! The work runs in three phases separated by barriers: a parallel
//! histogram count, a sequential lookup table build and a parallel remap.
//!
//! # Example
//!
//! ```
//! use histeq::{Channel, Image};
//! use histeq::enhance::equalize;
//!
//! // Two dark levels are stretched to the top of the range
//! let img = Image::from_raw(2, 1, 1, vec![10, 20]).unwrap();
//! let out = equalize(&img, Channel::FIRST, 2).unwrap();
//! assert_eq!(out.data(), &[128, 255]);
//! ```

pub mod cli;

// Re-export core types (primary data structures used everywhere)
pub use histeq_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use histeq_enhance as enhance;
pub use histeq_io as io;

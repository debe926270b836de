//! histeq-core - Basic data structures for histogram equalization
//!
//! This crate provides the data types shared by every stage of the
//! equalization pipeline:
//!
//! - [`Image`] - 8-bit interleaved pixel buffer
//! - [`Channel`] - Selector for one byte of each pixel
//! - [`Histogram`] - 256-bin level counts
//! - [`LookupTable`] - 256-entry level remapping
//!
//! Every sample is a `u8`, so the `[0, 255]` range invariant holds by
//! construction. Data arriving from outside in a wider type goes through
//! [`Image::from_samples`] or [`LookupTable::from_levels`], which check it.

pub mod error;
pub mod histogram;
pub mod image;
pub mod lut;

pub use error::{Error, Result};
pub use histogram::{Histogram, LEVELS};
pub use image::{Channel, Image};
pub use lut::LookupTable;

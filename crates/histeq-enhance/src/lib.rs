//! histeq-enhance - Parallel histogram equalization
//!
//! This crate implements the equalization pipeline on top of the
//! `histeq-core` types:
//!
//! - [`accumulate`] - Histogram of one channel, counted in parallel with
//!   private per-worker histograms and a locked merge
//! - [`build_lut`] - Cumulative distribution to lookup table, sequential
//! - [`remap`] / [`remap_in_place`] - Table applied to one channel in
//!   parallel; the other channels are copied through
//! - [`Equalizer`] / [`equalize`] - The three phases in order on a
//!   bounded `rayon` pool
//!
//! The worker count is always an explicit argument. Nothing in this
//! crate reads or writes process-global configuration.

mod accumulate;
mod config;
mod equalize;
mod error;
mod lut;
mod partition;
mod remap;

pub use accumulate::accumulate;
pub use config::{EqualizeOptions, default_workers};
pub use equalize::{EqualizeReport, Equalizer, equalize, equalize_all_channels};
pub use error::{EnhanceError, EnhanceResult};
pub use lut::build_lut;
pub use partition::partition_rows;
pub use remap::{remap, remap_in_place};

//! histeq-test - Regression test framework for histeq
//!
//! Regression tests run in one of three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison
//!
//! Test images are synthesized in code so the suite needs no binary
//! fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use histeq_test::{RegParams, ramp};
//!
//! let mut rp = RegParams::new("equalize");
//! let img = ramp(256, 1).unwrap();
//! rp.compare_values(256.0, img.pixel_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use histeq_core::Image;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // histeq-test is at crates/histeq-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// A single-channel image whose row `y` holds levels `0, 1, 2, ...`
/// wrapping at 256.
pub fn ramp(width: u32, height: u32) -> TestResult<Image> {
    let data = (0..height)
        .flat_map(|_| (0..width).map(|x| (x % 256) as u8))
        .collect();
    Ok(Image::from_raw(width, height, 1, data)?)
}

/// A multi-channel image where channel `c` of pixel `(x, y)` is
/// `x * (c + 1) + y`, truncated to 8 bits.
pub fn gradient(width: u32, height: u32, channels: u32) -> TestResult<Image> {
    let mut data = Vec::with_capacity(width as usize * height as usize * channels as usize);
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                data.push((x * (c + 1) + y) as u8);
            }
        }
    }
    Ok(Image::from_raw(width, height, channels, data)?)
}

/// Deterministic pseudo-random samples from a linear congruential
/// generator, reproducible for a given `seed`.
pub fn noise(width: u32, height: u32, channels: u32, seed: u64) -> TestResult<Image> {
    let len = width as usize * height as usize * channels as usize;
    let mut state = seed;
    let data = (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
        .collect();
    Ok(Image::from_raw(width, height, channels, data)?)
}

/// An image with every sample set to `value`.
pub fn uniform(width: u32, height: u32, channels: u32, value: u8) -> TestResult<Image> {
    let len = width as usize * height as usize * channels as usize;
    Ok(Image::from_raw(width, height, channels, vec![value; len])?)
}

/// A single-channel image cycling through `levels` in raster order.
pub fn levels(width: u32, height: u32, levels: &[u8]) -> TestResult<Image> {
    let len = width as usize * height as usize;
    let data = levels.iter().copied().cycle().take(len).collect();
    Ok(Image::from_raw(width, height, 1, data)?)
}

//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use histeq_core::Image;
use histeq_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognized is `Compare`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check, the mode and
/// every failure recorded so far.
pub struct RegParams {
    /// Name of the test (e.g., "equalize")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create regression test parameters with the mode taken from
    /// `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        Self::with_mode(test_name, RegTestMode::from_env())
    }

    /// Create regression test parameters with an explicit mode.
    pub fn with_mode(test_name: &str, mode: RegTestMode) -> Self {
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality of shape and samples
    pub fn compare_images(&mut self, image1: &Image, image2: &Image) -> bool {
        self.index += 1;

        if !image1.same_shape(image2) {
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - shape mismatch \
                 ({}x{}x{} vs {}x{}x{})",
                self.test_name,
                self.index,
                image1.width(),
                image1.height(),
                image1.channels(),
                image2.width(),
                image2.height(),
                image2.channels()
            ));
            return false;
        }

        let mismatch = image1
            .data()
            .iter()
            .zip(image2.data())
            .position(|(a, b)| a != b);
        if let Some(offset) = mismatch {
            let stride = image1.row_stride().max(1);
            let channels = image1.channels() as usize;
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - sample mismatch at \
                 ({}, {}) channel {}",
                self.test_name,
                self.index,
                (offset % stride) / channels,
                offset / stride,
                offset % channels
            ));
            return false;
        }

        true
    }

    /// Compare two byte arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            ));
            false
        } else {
            true
        }
    }

    /// Write an image under `tests/regout` and check it against its
    /// golden counterpart.
    pub fn write_image_and_check(&mut self, image: &Image, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        histeq_io::write_image(image, &local_path, format).map_err(|e| TestError::ImageWrite {
            path: local_path.clone(),
            message: e.to_string(),
        })?;

        self.check_file(&local_path)
    }

    /// Write raw data under `tests/regout` and check it against its
    /// golden counterpart.
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );

        fs::write(&local_path, data)?;
        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with the golden file.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    ));
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                // encoders may differ byte-wise while decoding identically
                if local_data != golden_data && !same_decoded(&local_data, &golden_data) {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if every check passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn same_decoded(data1: &[u8], data2: &[u8]) -> bool {
    match (
        histeq_io::read_image_from_bytes(data1),
        histeq_io::read_image_from_bytes(data2),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

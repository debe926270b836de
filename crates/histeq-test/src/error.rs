//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write an image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// Failed to synthesize a test image
    #[error("failed to build test image: {0}")]
    Synthesis(#[from] histeq_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;

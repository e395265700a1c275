//! Error types for the stimgen system.
//!
//! All operations return structured errors rather than panicking.
//! This enables clear error reporting from the CLI driver.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Gen: invalid generation parameters (probability, payload length)
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Generation parameter error (e.g., out-of-range probability)
    #[error("generation error: {0}")]
    Gen(#[from] GenError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generation parameter errors.
#[derive(Debug, Error)]
pub enum GenError {
    /// Valid-frame probability outside (0.0, 1.0].
    ///
    /// Zero is rejected because the sampling loops would never terminate
    /// by chance alone; NaN and values above 1.0 are meaningless.
    #[error("valid-frame chance {0} outside (0.0, 1.0]")]
    ChanceOutOfRange(f64),

    /// Payload length does not fit the 32-bit size field
    #[error("payload length {0} exceeds the 32-bit size field")]
    PayloadTooLong(usize),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

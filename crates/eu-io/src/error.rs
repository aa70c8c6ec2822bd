//! Error types for file I/O.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or corrupted file.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Fewer pixel bytes than the header promises.
    #[error("truncated pixel data: expected {expected} bytes, found {actual}")]
    Truncated {
        /// Bytes required by the header.
        expected: usize,
        /// Bytes present after the header.
        actual: usize,
    },

    /// Output format not recognised from the file name.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Invalid image description.
    #[error(transparent)]
    Core(#[from] eu_core::Error),
}

impl IoError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidFile(reason.into())
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;

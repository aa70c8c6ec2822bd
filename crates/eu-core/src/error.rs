//! Error types for eu-core operations.
//!
//! The [`Error`] enum covers the failure modes shared by every crate of the
//! viewer:
//! - Sources that are closed or carry no pixel data
//! - Invalid zoom factors
//! - Buffer and dimension mismatches
//! - I/O errors surfaced by `eu-io`
//!
//! # Usage
//!
//! ```rust
//! use eu_core::{Error, Result};
//!
//! fn check_scale(scale: f32) -> Result<()> {
//!     if !(scale.is_finite() && scale > 0.0) {
//!         return Err(Error::InvalidScale(scale));
//!     }
//!     Ok(())
//! }
//! assert!(check_scale(0.0).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while sampling or describing images.
#[derive(Debug, Error)]
pub enum Error {
    /// The image source is not opened or has no pixel data.
    ///
    /// A grab on such a source fails; callers skip the frame.
    #[error("image source has no valid data: {0}")]
    InvalidSource(String),

    /// The ROI scale is not a finite positive number.
    #[error("invalid roi scale {0}, must be finite and > 0")]
    InvalidScale(f32),

    /// Invalid image or buffer dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::InvalidSource`] error.
    #[inline]
    pub fn invalid_source(reason: impl Into<String>) -> Self {
        Self::InvalidSource(reason.into())
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the frame should simply be skipped.
    #[inline]
    pub fn is_invalid_source(&self) -> bool {
        matches!(self, Self::InvalidSource(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_source() {
        let err = Error::invalid_source("file closed");
        assert!(err.is_invalid_source());
        assert!(err.to_string().contains("file closed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_invalid_source());
    }
}

//! Error type for view operations.

use thiserror::Error;

/// Result alias for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors from sampling a frame.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Source or ROI rejected by the sampler.
    #[error(transparent)]
    Core(#[from] eu_core::Error),
}

impl ViewError {
    /// Returns `true` if the caller should skip the frame and keep the
    /// previous one on screen.
    pub fn is_invalid_source(&self) -> bool {
        match self {
            Self::Core(e) => e.is_invalid_source(),
        }
    }
}

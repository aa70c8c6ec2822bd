//! Error types for color operations.

use thiserror::Error;

/// Color configuration error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// A setting name did not match any known variant.
    #[error("unknown {kind} '{name}' (expected one of: {expected})")]
    UnknownName {
        /// Which setting was parsed ("curve", "gamut", ...).
        kind: &'static str,
        /// The rejected input.
        name: String,
        /// Accepted names, comma separated.
        expected: &'static str,
    },

    /// Gamut mapping failed.
    #[error(transparent)]
    Gamut(#[from] GamutError),
}

impl ColorError {
    pub(crate) fn unknown(kind: &'static str, name: &str, expected: &'static str) -> Self {
        Self::UnknownName {
            kind,
            name: name.to_string(),
            expected,
        }
    }
}

/// Out-of-gamut handling hit an inconsistent state.
///
/// Reported instead of writing corrupted pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GamutError {
    /// The projection blend factor left `[0, 1]`.
    #[error("gamut projection factor {a} outside [0, 1] on channel {channel}")]
    ProjectionOutOfRange {
        /// Channel being projected.
        channel: usize,
        /// Computed blend factor.
        a: f32,
    },
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;

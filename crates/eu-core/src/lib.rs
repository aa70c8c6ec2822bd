//! # eu-core
//!
//! Core types shared by the eu viewer crates.
//!
//! - [`ImageSource`] - Read-only float image the sampler pulls triples from
//! - [`ImageBuffer`] - In-memory [`ImageSource`] backed by a `Vec<f32>`
//! - [`OutputBuffer`] - 8-bit RGB frame the sampler writes into
//! - [`Roi`], [`OutputRect`] - Input region of interest and destination rectangle
//! - [`Error`] - Errors shared across the workspace
//!
//! ## Crate Structure
//!
//! ```text
//! eu-core (this crate)        eu-color (transform chain)
//!    ^                            ^
//!    |                            |
//!    +-- eu-io (PFM files, frame export)
//!    +-- eu-view (ROI sampler, viewport helpers) --+
//!    +-- eu-cli ----------------------------------+
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod rect;
pub mod source;

pub use buffer::OutputBuffer;
pub use error::{Error, Result};
pub use rect::{OutputRect, Roi};
pub use source::{ImageBuffer, ImageSource};

/// Prelude module for convenient imports.
///
/// ```
/// use eu_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::OutputBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::rect::{OutputRect, Roi};
    pub use crate::source::{ImageBuffer, ImageSource};
}

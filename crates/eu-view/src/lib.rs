//! # eu-view
//!
//! Turns a float [`ImageSource`](eu_core::ImageSource) into display bytes.
//!
//! ```text
//!  ImageSource ──► grab ──────────────────────────────────► OutputBuffer
//!                   │  clamp ROI, letterbox, 2x2 box filter      ▲
//!                   └──► TransformChain (eu-color) ───────────────┘
//! ```
//!
//! - [`grab`] - Render one frame into a caller-owned buffer
//! - [`ViewSettings`] - ROI, destination rectangle and color settings
//! - [`Session`] - Gamut mark counter and custom profile, kept across frames
//! - [`viewport`] - Pointer mapping, fit, home, zoom and pan
//!
//! # Features
//!
//! - `parallel` - render rows on the rayon pool
//!
//! # Dependencies
//!
//! - `eu-core` - sources, geometry and buffers
//! - `eu-color` - per-pixel transform chain
//!
//! # Used By
//!
//! - `eu-cli`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod sampler;
mod settings;
pub mod viewport;

pub use error::{ViewError, ViewResult};
pub use sampler::{GrabReport, grab};
pub use settings::{Session, ViewSettings};

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::{GrabReport, Session, ViewError, ViewResult, ViewSettings, grab};
}

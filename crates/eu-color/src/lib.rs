//! # eu-color
//!
//! Per-pixel transform chain that turns a sampled float triple into
//! display bytes.
//!
//! The stages always run in this order:
//!
//! ```text
//!  [f32; 3] ──► exposure ──► convert ──► gamut map ──► tone curve ──► channel mask ──► [u8; 3]
//!              2^ev*gain    XYZ->RGB    clamp/project   none/contrast/   r/g/b/rgb
//!                          + encoding   /mark           tonemap/isolines/
//!                                                       viridis
//! ```
//!
//! - [`convert`] - Output color spaces and custom display profiles
//! - [`transfer`] - Encoding curves (sign-preserving power, toe + gamma)
//! - [`gamut`] - Out-of-gamut policies
//! - [`curve`] - Tone curves and 8-bit encoding
//! - [`channels`] - Single-channel preview
//! - [`TransformChain`] - All of the above, resolved once per frame
//!
//! # Quick Start
//!
//! ```rust
//! use eu_color::{ConversionSettings, MarkCounter, TransformChain};
//!
//! let settings = ConversionSettings::default();
//! let chain = TransformChain::new(&settings, 1.0);
//! let marks = MarkCounter::new();
//!
//! let bytes = chain.apply([0.5, 0.5, 0.5], &marks).unwrap();
//! assert_eq!(bytes, [127, 127, 127]);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod chain;
mod error;
pub mod channels;
pub mod convert;
pub mod curve;
pub mod gamut;
pub mod matrix;
pub mod transfer;

pub use chain::{ConversionSettings, TransformChain};
pub use channels::Channels;
pub use convert::{Converter, CustomProfile, InputSpace, MatrixProfile, OutputSpace};
pub use curve::Curve;
pub use error::{ColorError, ColorResult, GamutError};
pub use gamut::{GamutMap, MarkCounter};

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::{
        Channels, ConversionSettings, Curve, CustomProfile, GamutMap, InputSpace, MarkCounter,
        MatrixProfile, OutputSpace, TransformChain,
    };
}

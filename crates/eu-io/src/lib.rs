//! # eu-io
//!
//! File collaborator of the eu viewer.
//!
//! - [`PfmFile`] - PFM mapped into memory, usable as an [`ImageSource`](eu_core::ImageSource)
//! - [`pfm::write`] - PFM writer with 16-byte aligned pixel data
//! - [`frame`] - PNG / PPM export of rendered [`OutputBuffer`](eu_core::OutputBuffer)s
//!
//! # Example
//!
//! ```rust,no_run
//! use eu_core::OutputBuffer;
//! use eu_io::{frame, PfmFile};
//!
//! let pfm = PfmFile::open("input.pfm")?;
//! let out = OutputBuffer::new(512, 512)?;
//! // ... grab into `out` ...
//! frame::write("frame.png", &out)?;
//! # Ok::<(), eu_io::IoError>(())
//! ```
//!
//! # Dependencies
//!
//! - `memmap2` - read-only file mapping
//! - `byteorder` - endian-aware float access
//! - `png` - frame export

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod frame;
pub mod pfm;

pub use error::{IoError, IoResult};
pub use pfm::{PfmFile, PfmHeader};

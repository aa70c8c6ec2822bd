//! Image sources the sampler reads from.
//!
//! [`ImageSource`] is the contract between the file collaborator and the ROI
//! sampler: dimensions, an optional gain and row-major access to float
//! triples. [`ImageBuffer`] is the in-memory implementation.

use crate::{Error, Result};

/// Read-only float image, row-major, top row first.
///
/// Implementations must be cheap to sample: `sample` runs four times per
/// output pixel on every frame.
pub trait ImageSource: Sync {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Channels stored per pixel (1 or 3).
    fn channels(&self) -> u32 {
        3
    }

    /// Scalar gain applied uniformly before conversion.
    fn gain(&self) -> f32 {
        1.0
    }

    /// Whether pixel data is available. A closed file reports `false`.
    fn is_open(&self) -> bool {
        true
    }

    /// RGB triple at row-major pixel `index`, `0 <= index < width * height`.
    ///
    /// Single-channel sources replicate their value to all three components.
    fn sample(&self, index: usize) -> [f32; 3];

    /// Number of pixels.
    #[inline]
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// In-memory image with 1 or 3 float channels per pixel.
///
/// # Example
///
/// ```rust
/// use eu_core::{ImageBuffer, ImageSource};
///
/// let img = ImageBuffer::filled(4, 4, [0.5, 0.25, 1.0]);
/// assert_eq!(img.sample(5), [0.5, 0.25, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    channels: u32,
    gain: f32,
    data: Vec<f32>,
}

impl ImageBuffer {
    /// Wraps row-major `data` holding `channels` floats per pixel.
    ///
    /// Fails if `channels` is not 1 or 3, a dimension is zero, or `data`
    /// has the wrong length.
    pub fn from_vec(width: u32, height: u32, channels: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero-sized image"));
        }
        if channels != 1 && channels != 3 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("unsupported channel count {channels}"),
            ));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(channels as usize))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflow"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {expected} samples, got {}", data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            gain: 1.0,
            data,
        })
    }

    /// Creates a 3-channel image with every pixel set to `rgb`.
    ///
    /// # Panics
    ///
    /// Panics if a dimension is zero.
    pub fn filled(width: u32, height: u32, rgb: [f32; 3]) -> Self {
        assert!(width > 0 && height > 0, "zero-sized image");
        let n = width as usize * height as usize;
        let mut data = Vec::with_capacity(n * 3);
        for _ in 0..n {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            channels: 3,
            gain: 1.0,
            data,
        }
    }

    /// Creates a 3-channel image from a per-pixel function of (x, y).
    ///
    /// # Panics
    ///
    /// Panics if a dimension is zero.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [f32; 3]) -> Self {
        assert!(width > 0 && height > 0, "zero-sized image");
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            channels: 3,
            gain: 1.0,
            data,
        }
    }

    /// Sets the scalar gain reported through [`ImageSource::gain`].
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Raw samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

impl ImageSource for ImageBuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn channels(&self) -> u32 {
        self.channels
    }

    #[inline]
    fn gain(&self) -> f32 {
        self.gain
    }

    #[inline]
    fn sample(&self, index: usize) -> [f32; 3] {
        if self.channels == 1 {
            let v = self.data[index];
            [v, v, v]
        } else {
            let i = index * 3;
            [self.data[i], self.data[i + 1], self.data[i + 2]]
        }
    }
}

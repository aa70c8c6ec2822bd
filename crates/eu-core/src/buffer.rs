//! 8-bit RGB output frames.

use crate::{Error, OutputRect, Result};

/// Caller-owned display frame: row-major, 3 bytes per pixel, row 0 on top.
///
/// Allocated once and reused; every grab overwrites it entirely.
///
/// ```rust
/// use eu_core::OutputBuffer;
///
/// let buf = OutputBuffer::new(4, 2).unwrap();
/// assert_eq!(buf.pixels().len(), 4 * 2 * 3);
/// assert_eq!(buf.pixel(3, 1), [0, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl OutputBuffer {
    /// Allocates a black frame.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(3))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "size overflow"))?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The whole frame as a rectangle at the origin.
    #[inline]
    pub fn bounds(&self) -> OutputRect {
        OutputRect::from_size(self.width, self.height)
    }

    /// Raw bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Raw bytes, mutable.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * 3
    }

    /// RGB bytes at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the frame.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_match_dims() {
        let buf = OutputBuffer::new(7, 3).unwrap();
        assert_eq!(buf.bounds(), OutputRect::new(0, 0, 7, 3));
        assert_eq!(buf.stride(), 21);
    }

    #[test]
    fn empty_buffer_allowed() {
        let buf = OutputBuffer::new(0, 0).unwrap();
        assert!(buf.pixels().is_empty());
        assert!(buf.bounds().is_empty());
    }
}

//! Region of interest and output rectangle types.
//!
//! - [`Roi`] - Window into the input image: float origin plus zoom scale
//! - [`OutputRect`] - Destination rectangle inside the output buffer
//!
//! # Coordinate System
//!
//! Both input and output use the image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! ```text
//!  input (image pixels)                 output (buffer pixels)
//! (0,0) ──────────► X                  (0,0) ──────────► X
//!   │   (x,y)                            │ ┌────────────────┐
//!   │     ┌──────┐   * scale             │ │ ┌────────────┐ │
//!   │     │ ROI  │  ───────────►         │ │ │ OutputRect │ │
//!   │     └──────┘                       │ │ └────────────┘ │
//!   ▼                                    ▼ └────────────────┘
//! ```

/// Region of interest in input-image space.
///
/// `x`/`y` is the top-left origin in input pixels; it does not need to be
/// integral after panning. `scale` is the number of output pixels per input
/// pixel and must be finite and positive.
///
/// # Example
///
/// ```rust
/// use eu_core::Roi;
///
/// let roi = Roi::new(10.5, 4.0, 2.0);
/// assert_eq!(roi.step(), 0.5);
/// assert!(roi.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roi {
    /// Left edge in input pixels
    pub x: f32,
    /// Top edge in input pixels
    pub y: f32,
    /// Output pixels per input pixel
    pub scale: f32,
}

impl Roi {
    /// Creates a region of interest.
    #[inline]
    pub const fn new(x: f32, y: f32, scale: f32) -> Self {
        Self { x, y, scale }
    }

    /// Returns `true` if `scale` is finite and positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }

    /// Input pixels advanced per output pixel (`1 / scale`).
    #[inline]
    pub fn step(&self) -> f32 {
        1.0 / self.scale
    }
}

impl Default for Roi {
    /// 1:1 at the image origin.
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// A rectangle in output-buffer pixels.
///
/// Describes where a frame lands inside an [`OutputBuffer`](crate::OutputBuffer).
/// A rectangle with zero width or height is empty.
///
/// # Example
///
/// ```rust
/// use eu_core::OutputRect;
///
/// let rect = OutputRect::new(10, 20, 100, 50);
/// assert_eq!(rect.right(), 110);
/// assert_eq!(rect.bottom(), 70);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OutputRect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl OutputRect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle at (0, 0) with given dimensions.
    ///
    /// ```rust
    /// use eu_core::OutputRect;
    ///
    /// let rect = OutputRect::from_size(512, 512);
    /// assert_eq!((rect.x, rect.y), (0, 0));
    /// ```
    #[inline]
    pub const fn from_size(w: u32, h: u32) -> Self {
        Self::new(0, 0, w, h)
    }

    /// X coordinate of the right edge (exclusive), saturating at `u32::MAX`.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Y coordinate of the bottom edge (exclusive), saturating at `u32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Returns `true` if the point (px, py) is inside this rectangle.
    ///
    /// Inclusive on the left/top edges, exclusive on the right/bottom edges.
    ///
    /// ```rust
    /// use eu_core::OutputRect;
    ///
    /// let rect = OutputRect::new(10, 10, 100, 100);
    /// assert!(rect.contains(10, 10));
    /// assert!(!rect.contains(110, 110));
    /// ```
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns the intersection of this rectangle with another.
    ///
    /// Returns `None` if the rectangles don't overlap.
    ///
    /// ```rust
    /// use eu_core::OutputRect;
    ///
    /// let a = OutputRect::new(0, 0, 100, 100);
    /// let b = OutputRect::new(50, 50, 100, 100);
    /// assert_eq!(a.intersect(&b), Some(OutputRect::new(50, 50, 50, 50)));
    /// ```
    #[inline]
    pub fn intersect(&self, other: &OutputRect) -> Option<OutputRect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(OutputRect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roi_validity() {
        assert!(Roi::default().is_valid());
        assert!(!Roi::new(0.0, 0.0, 0.0).is_valid());
        assert!(!Roi::new(0.0, 0.0, -1.0).is_valid());
        assert!(!Roi::new(0.0, 0.0, f32::NAN).is_valid());
        assert!(!Roi::new(0.0, 0.0, f32::INFINITY).is_valid());
    }

    #[test]
    fn rect_edges_saturate() {
        let far = OutputRect::new(u32::MAX - 2, u32::MAX, 10, 4);
        assert_eq!(far.right(), u32::MAX);
        assert_eq!(far.bottom(), u32::MAX);
        assert_eq!(far.intersect(&OutputRect::from_size(4, 4)), None);
    }

    #[test]
    fn rect_intersect_disjoint() {
        let a = OutputRect::new(0, 0, 10, 10);
        let b = OutputRect::new(10, 0, 10, 10);
        assert_eq!(a.intersect(&b), None);
        assert!(OutputRect::new(5, 5, 0, 3).is_empty());
    }
}

//! ROI sampler: float source to 8-bit frame.
//!
//! ```text
//!  OutputBuffer
//! ┌──────────────────────────────────────┐
//! │ black                                │
//! │    ┌─ roi_out ────────────────────┐  │
//! │    │ black (letterbox)            │  │
//! │    │   ┌─ covered ─────────────┐  │  │
//! │    │ b │ box-filtered samples  │ b│  │
//! │    │   │ through the chain     │  │  │
//! │    │   └───────────────────────┘  │  │
//! │    │ black                        │  │
//! │    └──────────────────────────────┘  │
//! └──────────────────────────────────────┘
//! ```
//!
//! Output pixel `(i, j)` of the covered rectangle reads the input around
//! `(x0 + i / scale, y0 + j / scale)`, where `(x0, y0)` is the clamped ROI
//! origin. Every byte of the buffer is written on each grab.

use eu_color::{MarkCounter, TransformChain};
use eu_core::{Error, ImageSource, OutputBuffer, OutputRect, Roi};
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::ViewResult;
use crate::settings::{Session, ViewSettings};

/// Outcome of a successful grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrabReport {
    /// Part of the buffer that received image pixels; the rest is black.
    pub covered: OutputRect,
    /// Pixels drawn black because gamut projection failed.
    pub gamut_faults: u64,
}

/// Mapping between output pixels and input coordinates for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Layout {
    /// Clamped ROI origin, input pixels.
    pub x0: f32,
    pub y0: f32,
    /// Input pixels per output pixel.
    pub step: f32,
    /// Destination of image pixels, buffer coordinates.
    pub covered: OutputRect,
}

impl Layout {
    /// `rect` must already lie inside a `buf_w` x `buf_h` buffer.
    pub(crate) fn new(
        img_w: u32,
        img_h: u32,
        roi: Roi,
        rect: OutputRect,
        buf_w: u32,
        buf_h: u32,
    ) -> Self {
        let scale = roi.scale;
        let (iw, ih) = (img_w as f32, img_h as f32);

        let x0 = clamp_origin(roi.x, iw - rect.w as f32 / scale - 1.0);
        let y0 = clamp_origin(roi.y, ih - rect.h as f32 / scale - 1.0);

        let ox = letterbox(rect.w, iw * scale);
        let oy = letterbox(rect.h, ih * scale);

        let w = extent(
            rect.w.saturating_sub(ox),
            (iw - x0) * scale,
            buf_w.saturating_sub(rect.x.saturating_add(ox)),
        );
        let h = extent(
            rect.h.saturating_sub(oy),
            (ih - y0) * scale,
            buf_h.saturating_sub(rect.y.saturating_add(oy)),
        );

        Self {
            x0,
            y0,
            step: roi.step(),
            covered: OutputRect::new(
                rect.x.saturating_add(ox),
                rect.y.saturating_add(oy),
                w,
                h,
            ),
        }
    }
}

/// NaN and negatives go to 0; `max` below 0 pins the origin at 0.
#[inline]
fn clamp_origin(v: f32, max: f32) -> f32 {
    let max = max.max(0.0);
    if v > 0.0 { v.min(max) } else { 0.0 }
}

#[inline]
fn letterbox(out: u32, scaled: f32) -> u32 {
    ((out as f32 - scaled) / 2.0).max(0.0) as u32
}

#[inline]
fn extent(requested: u32, input: f32, buffer: u32) -> u32 {
    (requested as f32).min(input).min(buffer as f32).max(0.0) as u32
}

/// Truncates an input coordinate to a valid index.
#[inline]
fn index(v: f32, len: usize) -> usize {
    (v as usize).min(len - 1)
}

struct Frame<'a, S: ?Sized> {
    source: &'a S,
    chain: TransformChain,
    marks: &'a MarkCounter,
    layout: Layout,
    width: usize,
    height: usize,
    /// Input column pair `[x, x + half step]` per covered output column.
    cols: Vec<[usize; 2]>,
}

impl<S: ImageSource + ?Sized> Frame<'_, S> {
    /// Writes buffer row `y`; returns the number of gamut faults.
    fn render_row(&self, y: u32, row: &mut [u8]) -> u64 {
        let cov = self.layout.covered;
        if y < cov.y || y >= cov.bottom() {
            row.fill(0);
            return 0;
        }
        let left = cov.x as usize * 3;
        let right = cov.right() as usize * 3;
        row[..left].fill(0);
        row[right..].fill(0);

        let half = 0.5 * self.layout.step;
        let iy = self.layout.y0 + (y - cov.y) as f32 * self.layout.step;
        let r0 = index(iy, self.height) * self.width;
        let r1 = index(iy + half, self.height) * self.width;

        let mut faults = 0;
        for (px, &[c0, c1]) in row[left..right].chunks_exact_mut(3).zip(&self.cols) {
            let a = self.source.sample(r0 + c0);
            let b = self.source.sample(r1 + c0);
            let c = self.source.sample(r0 + c1);
            let d = self.source.sample(r1 + c1);
            let avg = [0, 1, 2].map(|k| (a[k] + b[k] + c[k] + d[k]) * 0.25);

            let bytes = match self.chain.apply(avg, self.marks) {
                Ok(bytes) => bytes,
                Err(_) => {
                    faults += 1;
                    [0; 3]
                }
            };
            px.copy_from_slice(&bytes);
        }
        faults
    }
}

/// Renders `settings.roi` of `source` into `out`.
///
/// The whole buffer is overwritten: image pixels inside the covered part of
/// `settings.roi_out`, black everywhere else. The ROI origin is clamped so
/// the view stays on the image, and an `roi_out` reaching past the buffer is
/// cut down to it.
///
/// # Errors
///
/// - [`Error::InvalidSource`] if the source is closed or has no pixels
/// - [`Error::InvalidScale`] if the ROI scale is not finite and positive
///
/// # Example
///
/// ```rust
/// use eu_core::{ImageBuffer, OutputBuffer};
/// use eu_view::{grab, Session, ViewSettings};
///
/// let img = ImageBuffer::filled(4, 4, [0.5; 3]);
/// let mut out = OutputBuffer::new(4, 4).unwrap();
/// let settings = ViewSettings::for_buffer(&out);
///
/// let report = grab(&img, &settings, &Session::new(), &mut out).unwrap();
/// assert_eq!(report.gamut_faults, 0);
/// assert!(out.pixels().iter().all(|&b| b == 127));
/// ```
pub fn grab<S: ImageSource + ?Sized>(
    source: &S,
    settings: &ViewSettings,
    session: &Session,
    out: &mut OutputBuffer,
) -> ViewResult<GrabReport> {
    if !source.is_open() {
        return Err(Error::invalid_source("source is closed").into());
    }
    let (img_w, img_h) = (source.width(), source.height());
    if img_w == 0 || img_h == 0 {
        return Err(Error::invalid_source(format!("empty image {img_w}x{img_h}")).into());
    }
    let roi = settings.roi;
    if !roi.is_valid() {
        return Err(Error::InvalidScale(roi.scale).into());
    }
    if out.pixels().is_empty() {
        return Ok(GrabReport::default());
    }

    let bounds = out.bounds();
    let rect = settings
        .roi_out
        .intersect(&bounds)
        .unwrap_or_else(|| OutputRect::new(0, 0, 0, 0));
    if rect != settings.roi_out {
        debug!(
            "roi_out {:?} exceeds {}x{} buffer, using {:?}",
            settings.roi_out, bounds.w, bounds.h, rect
        );
    }

    let layout = Layout::new(img_w, img_h, roi, rect, bounds.w, bounds.h);
    debug!(
        "grab {}x{} origin=({:.2}, {:.2}) scale={} covered={:?}",
        img_w, img_h, layout.x0, layout.y0, roi.scale, layout.covered
    );

    let width = img_w as usize;
    let half = 0.5 * layout.step;
    let cols = (0..layout.covered.w)
        .map(|i| {
            let ix = layout.x0 + i as f32 * layout.step;
            [index(ix, width), index(ix + half, width)]
        })
        .collect();

    let frame = Frame {
        source,
        chain: session.chain(&settings.color, source.gain()),
        marks: session.marks(),
        layout,
        width,
        height: img_h as usize,
        cols,
    };

    let stride = out.stride();

    #[cfg(feature = "parallel")]
    let gamut_faults: u64 = out
        .pixels_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .map(|(y, row)| frame.render_row(y as u32, row))
        .sum();

    #[cfg(not(feature = "parallel"))]
    let gamut_faults: u64 = out
        .pixels_mut()
        .chunks_mut(stride)
        .enumerate()
        .map(|(y, row)| frame.render_row(y as u32, row))
        .sum();

    if gamut_faults > 0 {
        warn!(
            "{} pixels failed gamut projection and were drawn black",
            gamut_faults
        );
    }

    Ok(GrabReport {
        covered: layout.covered,
        gamut_faults,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eu_core::ImageBuffer;

    fn settings(buf: &OutputBuffer, roi: Roi) -> ViewSettings {
        ViewSettings::for_buffer(buf).with_roi(roi)
    }

    fn square(n: u32) -> OutputRect {
        OutputRect::from_size(n, n)
    }

    #[test]
    fn layout_full_coverage() {
        let l = Layout::new(100, 100, Roi::new(10.0, 20.0, 1.0), square(50), 50, 50);
        assert_eq!(l.covered, OutputRect::new(0, 0, 50, 50));
        assert_eq!((l.x0, l.y0), (10.0, 20.0));
    }

    #[test]
    fn layout_clamps_origin() {
        // Max origin is 100 - 50 - 1 = 49.
        let l = Layout::new(100, 100, Roi::new(80.0, -5.0, 1.0), square(50), 50, 50);
        assert_eq!((l.x0, l.y0), (49.0, 0.0));
        let l = Layout::new(100, 100, Roi::new(f32::NAN, 1e9, 1.0), square(50), 50, 50);
        assert_eq!((l.x0, l.y0), (0.0, 49.0));
    }

    #[test]
    fn layout_letterbox() {
        let l = Layout::new(10, 10, Roi::default(), OutputRect::from_size(40, 20), 40, 20);
        assert_eq!(l.covered, OutputRect::new(15, 5, 10, 10));
    }

    #[test]
    fn layout_offset_rect() {
        let l = Layout::new(10, 10, Roi::new(0.0, 0.0, 2.0), OutputRect::new(4, 4, 30, 20), 40, 40);
        // 10 * 2 = 20 wide inside 30: 5 px bars.
        assert_eq!(l.covered, OutputRect::new(9, 4, 20, 20));
    }

    #[test]
    fn rejects_bad_scale() {
        let img = ImageBuffer::filled(2, 2, [0.0; 3]);
        let mut out = OutputBuffer::new(2, 2).unwrap();
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let s = settings(&out, Roi::new(0.0, 0.0, scale));
            let err = grab(&img, &s, &Session::new(), &mut out).unwrap_err();
            assert!(matches!(err, crate::ViewError::Core(Error::InvalidScale(_))));
        }
    }

    #[test]
    fn box_filter_averages_at_half_scale() {
        // Columns [0, 1] minified to one pixel: averages both.
        let img = ImageBuffer::from_fn(2, 2, |x, _| [x as f32; 3]);
        let mut out = OutputBuffer::new(1, 1).unwrap();
        let s = settings(&out, Roi::new(0.0, 0.0, 0.5));
        grab(&img, &s, &Session::new(), &mut out).unwrap();
        assert_eq!(out.pixel(0, 0), [127; 3]);
    }

    #[test]
    fn empty_buffer_is_noop() {
        let img = ImageBuffer::filled(2, 2, [1.0; 3]);
        let mut out = OutputBuffer::new(0, 0).unwrap();
        let s = ViewSettings::for_buffer(&out);
        let report = grab(&img, &s, &Session::new(), &mut out).unwrap();
        assert!(report.covered.is_empty());
    }
}

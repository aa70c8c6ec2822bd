//! Viewport math for interactive front ends.
//!
//! Pure functions over [`Roi`]; the window/event layer owns the state and
//! calls these from its input handlers. All pointer positions are output
//! buffer pixels, row 0 at the top.

use eu_core::{OutputRect, Roi};

use crate::sampler::Layout;
use crate::settings::ViewSettings;

/// Smallest zoom scale.
pub const ZOOM_MIN: f32 = 1.0 / 64.0;

/// Largest zoom scale.
pub const ZOOM_MAX: f32 = 64.0;

/// Maps a pointer position to input-image coordinates.
///
/// Uses the same geometry as [`grab`](crate::grab) with `settings.roi_out`
/// taken as lying inside the buffer. Returns `None` when the pointer is on a
/// black border or the ROI scale is invalid.
///
/// ```rust
/// use eu_core::{OutputRect, Roi};
/// use eu_view::{viewport, ViewSettings};
///
/// let settings = ViewSettings::new(OutputRect::from_size(100, 100))
///     .with_roi(Roi::new(10.0, 0.0, 2.0));
/// assert_eq!(viewport::pointer_to_image(&settings, 200, 200, 4, 6), Some((12.0, 3.0)));
/// ```
pub fn pointer_to_image(
    settings: &ViewSettings,
    image_w: u32,
    image_h: u32,
    px: u32,
    py: u32,
) -> Option<(f32, f32)> {
    let roi = settings.roi;
    if !roi.is_valid() || image_w == 0 || image_h == 0 {
        return None;
    }
    let rect = settings.roi_out;
    let layout = Layout::new(image_w, image_h, roi, rect, rect.right(), rect.bottom());
    let cov = layout.covered;
    if !cov.contains(px, py) {
        return None;
    }
    Some((
        layout.x0 + (px - cov.x) as f32 * layout.step,
        layout.y0 + (py - cov.y) as f32 * layout.step,
    ))
}

/// Largest scale that shows the whole image inside `rect`, origin at 0.
///
/// Falls back to [`home`] for empty images or rectangles.
pub fn fit(image_w: u32, image_h: u32, rect: OutputRect) -> Roi {
    if image_w == 0 || image_h == 0 || rect.is_empty() {
        return home();
    }
    let scale = (rect.w as f32 / image_w as f32).min(rect.h as f32 / image_h as f32);
    Roi::new(0.0, 0.0, scale.clamp(ZOOM_MIN, ZOOM_MAX))
}

/// 1:1 at the image origin.
#[inline]
pub fn home() -> Roi {
    Roi::default()
}

/// Multiplies the scale by `factor`, keeping the image point under
/// `pointer` (relative to the `roi_out` origin) in place.
///
/// The scale is limited to `[ZOOM_MIN, ZOOM_MAX]`; a non-positive or
/// non-finite `factor` leaves the ROI unchanged.
pub fn zoom(roi: Roi, factor: f32, pointer: (f32, f32)) -> Roi {
    if !(factor.is_finite() && factor > 0.0) || !roi.is_valid() {
        return roi;
    }
    let scale = (roi.scale * factor).clamp(ZOOM_MIN, ZOOM_MAX);
    // new_origin = old_origin + pointer * (1/old - 1/new)
    let diff = 1.0 / roi.scale - 1.0 / scale;
    Roi::new(
        (roi.x + pointer.0 * diff).max(0.0),
        (roi.y + pointer.1 * diff).max(0.0),
        scale,
    )
}

/// Moves the origin by an output-pixel delta.
///
/// Positive `dx` moves the view right over the image. The origin never goes
/// below 0; the upper bound is applied by the sampler.
pub fn pan(roi: Roi, dx: f32, dy: f32) -> Roi {
    if !roi.is_valid() {
        return roi;
    }
    Roi::new(
        (roi.x + dx / roi.scale).max(0.0),
        (roi.y + dy / roi.scale).max(0.0),
        roi.scale,
    )
}

//! Out-of-gamut handling for converted RGB.
//!
//! Only negative components are considered out of gamut; values above 1 are
//! left for the tone curve.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{ColorError, ColorResult, GamutError};

/// Neutral point components are projected towards.
pub const PROJECT_WHITE: f32 = 1.0 / 3.0;

const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];

/// Policy for negative RGB components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamutMap {
    /// Floor each channel at 0.
    #[default]
    Clamp,
    /// Desaturate towards white until the negative channel reaches 0.
    Project,
    /// Replace out-of-gamut pixels with alternating magenta / cyan.
    Mark,
}

impl GamutMap {
    /// Name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Project => "project",
            Self::Mark => "mark",
        }
    }

    /// All policies.
    pub const fn all() -> &'static [Self] {
        &[Self::Clamp, Self::Project, Self::Mark]
    }

    /// Maps one triple.
    ///
    /// `marks` drives the magenta / cyan alternation of [`GamutMap::Mark`].
    #[inline]
    pub fn apply(self, rgb: [f32; 3], marks: &MarkCounter) -> Result<[f32; 3], GamutError> {
        match self {
            Self::Clamp => Ok(clamp(rgb)),
            Self::Project => project(rgb),
            Self::Mark => Ok(mark(rgb, marks)),
        }
    }
}

impl FromStr for GamutMap {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "clamp" => Ok(Self::Clamp),
            "project" => Ok(Self::Project),
            "mark" => Ok(Self::Mark),
            _ => Err(ColorError::unknown("gamut mapping", s, "clamp, project, mark")),
        }
    }
}

impl fmt::Display for GamutMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counter driving the marker color alternation.
///
/// Owned by the viewing session and shared by reference across frames and
/// worker threads.
#[derive(Debug, Default)]
pub struct MarkCounter(AtomicU32);

impl MarkCounter {
    /// Starts at zero, so the first marked pixel is magenta.
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Returns the current count and advances it.
    #[inline]
    pub fn next(&self) -> u32 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Number of pixels marked so far (wrapping).
    pub fn count(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Resets to zero.
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

/// Floors every channel at zero.
///
/// ```rust
/// use eu_color::gamut::clamp;
///
/// assert_eq!(clamp([-0.5, 0.2, 1.5]), [0.0, 0.2, 1.5]);
/// ```
#[inline]
pub fn clamp(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(|v| v.max(0.0))
}

/// Desaturates towards [`PROJECT_WHITE`] one negative channel at a time.
///
/// Channels are visited in order 0, 1, 2 and updated in place. For a
/// negative channel `k` the blend factor is `a = white / (white - rgb[k])`;
/// the other channels move to `white + a * (c - white)` and `k` becomes 0.
/// A factor outside `[0, 1]` (or NaN) is reported, never clamped.
///
/// ```rust
/// use eu_color::gamut::project;
///
/// let out = project([-1.0 / 3.0, 1.0, 1.0 / 3.0]).unwrap();
/// assert_eq!(out[0], 0.0);
/// assert!((out[1] - 2.0 / 3.0).abs() < 1e-6);
/// ```
pub fn project(rgb: [f32; 3]) -> Result<[f32; 3], GamutError> {
    let white = PROJECT_WHITE;
    let mut out = rgb;
    for k in 0..3 {
        if out[k] < 0.0 {
            let a = white / (white - out[k]);
            if !(0.0..=1.0).contains(&a) {
                return Err(GamutError::ProjectionOutOfRange { channel: k, a });
            }
            for (i, c) in out.iter_mut().enumerate() {
                *c = if i == k { 0.0 } else { white + a * (*c - white) };
            }
        }
    }
    Ok(out)
}

/// Replaces a triple with any negative channel by a marker color.
///
/// Markers alternate magenta, cyan, magenta... on `marks`; in-gamut triples
/// pass through without touching the counter.
#[inline]
pub fn mark(rgb: [f32; 3], marks: &MarkCounter) -> [f32; 3] {
    if rgb.iter().any(|&v| v < 0.0) {
        if marks.next() % 2 == 0 { MAGENTA } else { CYAN }
    } else {
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clamp_is_idempotent() {
        let samples = [[-1.0, 0.5, 2.0], [0.0, -0.0, -1e-9], [0.3, 0.3, 0.3]];
        for s in samples {
            let once = clamp(s);
            assert_eq!(clamp(once), once);
            assert!(once.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn project_closed_form() {
        let white = PROJECT_WHITE;
        let rgb = [0.8, -0.2, 0.5];
        let a = white / (white + 0.2);
        let out = project(rgb).unwrap();
        assert_eq!(out[1], 0.0);
        assert_relative_eq!(out[0], white + a * (0.8 - white), epsilon = 1e-6);
        assert_relative_eq!(out[2], white + a * (0.5 - white), epsilon = 1e-6);
    }

    #[test]
    fn project_in_gamut_unchanged() {
        assert_eq!(project([0.1, 0.9, 0.0]).unwrap(), [0.1, 0.9, 0.0]);
    }

    #[test]
    fn project_processes_in_order() {
        // Channel 0 is fixed first (a = 10/13), which leaves channel 1 at -4/13;
        // projecting channel 1 (a = 0.52) then lifts channel 0 again.
        let out = project([-0.1, -0.5, 1.0]).unwrap();
        assert_relative_eq!(out[0], 0.16, epsilon = 1e-5);
        assert_eq!(out[1], 0.0);
        assert_relative_eq!(out[2], 0.6, epsilon = 1e-5);
    }

    #[test]
    fn project_extreme_inputs() {
        // white / inf = 0: the others collapse onto white
        let out = project([f32::NEG_INFINITY, 0.5, 0.9]).unwrap();
        assert_eq!(out, [0.0, PROJECT_WHITE, PROJECT_WHITE]);
        // NaN never compares below zero and is left alone
        let out = project([0.5, f32::NAN, 0.5]).unwrap();
        assert!(out[1].is_nan());
    }

    #[test]
    fn mark_alternates() {
        let marks = MarkCounter::new();
        assert_eq!(mark([-0.1, 0.5, 0.5], &marks), MAGENTA);
        assert_eq!(mark([0.2, 0.5, 0.5], &marks), [0.2, 0.5, 0.5]);
        assert_eq!(mark([0.5, -0.1, 0.5], &marks), CYAN);
        assert_eq!(mark([0.5, 0.5, -0.1], &marks), MAGENTA);
        assert_eq!(marks.count(), 3);
        marks.reset();
        assert_eq!(marks.count(), 0);
    }

    #[test]
    fn parse_names() {
        for &g in GamutMap::all() {
            assert_eq!(g.name().parse::<GamutMap>().unwrap(), g);
        }
        assert!("wrap".parse::<GamutMap>().is_err());
    }
}

//! Tone curves and 8-bit encoding.
//!
//! Each curve maps a display-encoded float triple to bytes:
//!
//! | Curve      | Per channel                                        |
//! |------------|----------------------------------------------------|
//! | `none`     | `255 * v`                                          |
//! | `contrast` | blend of `v` and a cosine S-curve                  |
//! | `tonemap`  | log-compress luma in BT.601 YUV, keep chroma ratio |
//! | `isolines` | bright bands at `i / 9` on the green channel       |
//! | `viridis`  | one channel through the viridis colormap           |
//!
//! Conversion to bytes clamps to `[0, 255]` and truncates; NaN encodes as 0.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::channels::Channels;
use crate::error::{ColorError, ColorResult};

/// Half-width of an isoline band.
pub const ISOLINE_WIDTH: f32 = 0.01;

/// Number of isoline intervals over `[0, 1]`.
pub const ISOLINE_STEPS: u32 = 9;

// Degree-5 fits of matplotlib's viridis, constant term first.
const VIRIDIS_R: [f32; 6] = [0.283392, -0.138923, 2.127593, -14.498564, 24.749076, -11.529983];
const VIRIDIS_G: [f32; 6] = [0.000565, 1.613182, -1.88647, 2.63225, -1.650374, 0.192412];
const VIRIDIS_B: [f32; 6] = [0.306676, 2.565846, -11.806011, 28.419695, -32.966604, 13.584273];

/// Final tone curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Curve {
    /// Straight scale to bytes.
    #[default]
    None,
    /// Mild S-curve.
    Contrast,
    /// Logarithmic luma compression.
    Tonemap,
    /// Contour bands on the green channel.
    Isolines,
    /// Pseudocolor of the selected channel.
    Viridis,
}

impl Curve {
    /// Name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Contrast => "contrast",
            Self::Tonemap => "tonemap",
            Self::Isolines => "isolines",
            Self::Viridis => "viridis",
        }
    }

    /// All curves.
    pub const fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::Contrast,
            Self::Tonemap,
            Self::Isolines,
            Self::Viridis,
        ]
    }

    /// Returns `true` for curves whose output is already pseudocolor.
    ///
    /// Channel isolation is skipped after those.
    pub const fn is_pseudocolor(self) -> bool {
        matches!(self, Self::Viridis)
    }

    /// Encodes one triple to bytes.
    ///
    /// `channels` only matters for [`Curve::Viridis`], which maps channel
    /// `channels.index() % 3`.
    #[inline]
    pub fn encode(self, rgb: [f32; 3], channels: Channels) -> [u8; 3] {
        match self {
            Self::None => rgb.map(to_byte),
            Self::Contrast => rgb.map(|v| to_byte(contrast(v))),
            Self::Tonemap => tonemap(rgb).map(to_byte),
            Self::Isolines => [to_byte(isolines(rgb[1])); 3],
            Self::Viridis => viridis(rgb[channels.index() % 3]).map(to_byte),
        }
    }
}

impl FromStr for Curve {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "linear" => Ok(Self::None),
            "contrast" => Ok(Self::Contrast),
            "tonemap" => Ok(Self::Tonemap),
            "isolines" => Ok(Self::Isolines),
            "viridis" => Ok(Self::Viridis),
            _ => Err(ColorError::unknown(
                "curve",
                s,
                "none, contrast, tonemap, isolines, viridis",
            )),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clamp where NaN falls to the low bound.
#[inline]
fn clamp_nan_low(v: f32, lo: f32, hi: f32) -> f32 {
    if v > lo {
        if v < hi { v } else { hi }
    } else {
        lo
    }
}

/// `[0, 1]` float to byte: scale by 255, clamp, truncate.
///
/// ```rust
/// use eu_color::curve::to_byte;
///
/// assert_eq!(to_byte(0.5), 127);
/// assert_eq!(to_byte(2.0), 255);
/// assert_eq!(to_byte(-1.0), 0);
/// assert_eq!(to_byte(f32::NAN), 0);
/// ```
#[inline]
pub fn to_byte(v: f32) -> u8 {
    clamp_nan_low(255.0 * v, 0.0, 255.0) as u8
}

/// Half linear, half raised cosine over `[0, 1]`.
#[inline]
pub fn contrast(v: f32) -> f32 {
    let s = 0.5 - (clamp_nan_low(v, 0.0, 1.0) * PI).cos() * 0.5;
    0.5 * v + 0.5 * s
}

/// Compresses luma to `log10(Y + 1)` and scales chroma by the same ratio.
pub fn tonemap(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = -0.14713 * r - 0.28886 * g + 0.436 * b;
    let v = 0.615 * r - 0.51499 * g - 0.10001 * b;

    let y2 = (y + 1.0).ln() / std::f32::consts::LN_10;
    let s = clamp_nan_low(y2 / y, 1e-5, 1e5);
    let (u, v) = (u * s, v * s);

    [
        y2 + 1.13983 * v,
        y2 - 0.39465 * u - 0.58060 * v,
        y2 + 2.03211 * u,
    ]
}

/// Band intensity: 1 on a level `i / 9`, falling to 0 at distance 0.01.
pub fn isolines(v: f32) -> f32 {
    let d = (0..=ISOLINE_STEPS)
        .map(|i| (v - i as f32 / ISOLINE_STEPS as f32).abs())
        .fold(f32::INFINITY, f32::min);
    ((ISOLINE_WIDTH - d) / ISOLINE_WIDTH).max(0.0)
}

/// Viridis colormap of `t`, clamped to `[0, 1]` (NaN reads as 0).
pub fn viridis(t: f32) -> [f32; 3] {
    let t = clamp_nan_low(t, 0.0, 1.0);
    [VIRIDIS_R, VIRIDIS_G, VIRIDIS_B].map(|c| horner(&c, t).clamp(0.0, 1.0))
}

#[inline]
fn horner(coeffs: &[f32], t: f32) -> f32 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn none_is_exact() {
        for i in 0..=1000 {
            let v = i as f32 / 1000.0;
            let expected = (255.0 * v).clamp(0.0, 255.0) as u8;
            assert_eq!(Curve::None.encode([v; 3], Channels::Rgb), [expected; 3]);
        }
    }

    #[test]
    fn contrast_fixed_points() {
        assert_relative_eq!(contrast(0.0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(contrast(0.5), 0.5, epsilon = 1e-6);
        assert_relative_eq!(contrast(1.0), 1.0, epsilon = 1e-6);
        // Darker below mid grey, brighter above.
        assert!(contrast(0.25) < 0.25);
        assert!(contrast(0.75) > 0.75);
    }

    #[test]
    fn tonemap_grey() {
        // Neutral input has (almost) no chroma; luma goes to log10(2).
        let out = tonemap([1.0, 1.0, 1.0]);
        for c in out {
            assert_relative_eq!(c, 2.0f32.log10(), epsilon = 1e-4);
        }
        assert_eq!(Curve::Tonemap.encode([1.0; 3], Channels::Rgb), [76, 76, 76]);
    }

    #[test]
    fn tonemap_black_is_finite() {
        // 0 / 0 ratio falls back to the low bound.
        assert_eq!(tonemap([0.0; 3]), [0.0; 3]);
    }

    #[test]
    fn isoline_bands() {
        assert_relative_eq!(isolines(2.0 / 9.0), 1.0, epsilon = 1e-5);
        assert_eq!(isolines(0.05), 0.0);
        assert!(isolines(0.005) > 0.0);
        let bytes = Curve::Isolines.encode([0.0, 0.05, 1.0], Channels::Rgb);
        assert_eq!(bytes, [0, 0, 0]);
    }

    #[test]
    fn viridis_endpoints() {
        let lo = viridis(0.0);
        assert_relative_eq!(lo[0], 0.283392, epsilon = 1e-6);
        assert_relative_eq!(lo[2], 0.306676, epsilon = 1e-6);
        let hi = viridis(1.0);
        assert!(hi[0] > 0.9 && hi[1] > 0.85 && hi[2] < 0.2, "{hi:?}");
        assert_eq!(viridis(f32::NAN), lo);
        assert_eq!(viridis(5.0), hi);
    }

    #[test]
    fn viridis_uses_selected_channel() {
        let rgb = [0.0, 1.0, 0.5];
        let red = Curve::Viridis.encode(rgb, Channels::Red);
        let green = Curve::Viridis.encode(rgb, Channels::Green);
        let all = Curve::Viridis.encode(rgb, Channels::Rgb);
        assert_eq!(red, viridis(0.0).map(to_byte));
        assert_eq!(green, viridis(1.0).map(to_byte));
        assert_eq!(all, red);
    }

    #[test]
    fn parse_names() {
        for &c in Curve::all() {
            assert_eq!(c.name().parse::<Curve>().unwrap(), c);
        }
        assert!("gamma".parse::<Curve>().is_err());
    }
}

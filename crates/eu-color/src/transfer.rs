//! Encoding curves applied after the XYZ to RGB matrix.
//!
//! - [`signed_pow`] - Power law mirrored for negative input (AdobeRGB, custom profiles)
//! - [`ToeGamma`] - Linear toe joined to a power segment (sRGB-like output)
//!
//! # Range
//!
//! Input is linear light, nominally [0, 1]; values outside are passed through
//! the same formulas and never produce NaN from a negative base.

/// AdobeRGB (1998) encoding gamma, 563/256.
pub const ADOBE_RGB_GAMMA: f32 = 2.199_218_75;

/// Breakpoint of the linear toe for sRGB output.
pub const SRGB_LINEAR: f32 = 0.1;

/// Exponent of the power segment for sRGB output.
pub const SRGB_GAMMA: f32 = 0.4;

/// Sign-preserving power: `sign(x) * |x|^g`.
///
/// ```rust
/// use eu_color::transfer::signed_pow;
///
/// assert_eq!(signed_pow(-4.0, 0.5), -2.0);
/// assert_eq!(signed_pow(4.0, 0.5), 2.0);
/// ```
#[inline]
pub fn signed_pow(x: f32, g: f32) -> f32 {
    x.abs().powf(g).copysign(x)
}

/// AdobeRGB OETF: linear to encoded, `x^(1/2.19921875)` with sign kept.
#[inline]
pub fn adobe_rgb_oetf(x: f32) -> f32 {
    signed_pow(x, 1.0 / ADOBE_RGB_GAMMA)
}

/// Linear toe plus power segment, matched in value and slope at the break.
///
/// ```text
/// y = c * x              x <  linear
/// y = (a * x + b)^g      x >= linear
///
/// a = 1 / (1 + linear * (g - 1))
/// b = linear * (g - 1) * a
/// c = (a * linear + b)^g / linear
/// ```
///
/// `a + b = 1`, so `y(1) = 1`.
///
/// # Example
///
/// ```rust
/// use eu_color::transfer::ToeGamma;
///
/// let curve = ToeGamma::srgb();
/// assert!((curve.eval(1.0) - 1.0).abs() < 1e-6);
/// assert_eq!(curve.eval(0.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToeGamma {
    /// Breakpoint between toe and power segment
    pub linear: f32,
    /// Exponent of the power segment
    pub g: f32,
    /// Scale inside the power
    pub a: f32,
    /// Offset inside the power
    pub b: f32,
    /// Slope of the toe
    pub c: f32,
}

impl ToeGamma {
    /// Solves the curve parameters for the given breakpoint and exponent.
    ///
    /// `linear == 0` or `gamma == 1` degrade to a pure power law.
    pub fn new(linear: f32, gamma: f32) -> Self {
        if linear <= 0.0 || gamma == 1.0 {
            return Self {
                linear: 0.0,
                g: gamma,
                a: 1.0,
                b: 0.0,
                c: 1.0,
            };
        }
        let g = gamma;
        let a = 1.0 / (1.0 + linear * (g - 1.0));
        let b = linear * (g - 1.0) * a;
        let c = (a * linear + b).powf(g) / linear;
        Self { linear, g, a, b, c }
    }

    /// The sRGB output curve: toe below 0.1, exponent 0.4 above.
    pub fn srgb() -> Self {
        Self::new(SRGB_LINEAR, SRGB_GAMMA)
    }

    /// Encodes one value.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        if x < self.linear {
            self.c * x
        } else {
            (self.a * x + self.b).powf(self.g)
        }
    }
}

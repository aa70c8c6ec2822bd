//! XYZ to RGB matrices.
//!
//! Matrices are 9 floats, row-major, one row per output channel:
//!
//! ```text
//! rgb[k] = xyz[0] * M[3k] + xyz[1] * M[3k + 1] + xyz[2] * M[3k + 2]
//! ```

/// XYZ to AdobeRGB (1998).
#[rustfmt::skip]
pub const XYZ_TO_ADOBE_RGB: [f32; 9] = [
    2.041369, -0.564946, -0.344694,
    -0.969266, 1.876011, 0.041556,
    0.013447, -0.118390, 1.015410,
];

/// XYZ to linear sRGB / Rec.709 primaries, D65.
#[rustfmt::skip]
pub const XYZ_TO_REC709: [f32; 9] = [
    3.240454, -1.537139, -0.498531,
    -0.969266, 1.876011, 0.041556,
    0.055643, -0.204026, 1.057225,
];

/// Identity.
#[rustfmt::skip]
pub const IDENTITY: [f32; 9] = [
    1.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    0.0, 0.0, 1.0,
];

/// Multiplies `v` by the row-major matrix `m`.
///
/// ```rust
/// use eu_color::matrix::{apply, IDENTITY};
///
/// assert_eq!(apply(&IDENTITY, [0.1, 0.2, 0.3]), [0.1, 0.2, 0.3]);
/// ```
#[inline]
pub fn apply(m: &[f32; 9], v: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0f32; 3];
    for (k, o) in out.iter_mut().enumerate() {
        for (i, x) in v.iter().enumerate() {
            *o += x * m[i + 3 * k];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rec709_row_sums() {
        // X=Y=Z=1 picks out the row sums.
        let rgb = apply(&XYZ_TO_REC709, [1.0, 1.0, 1.0]);
        assert_relative_eq!(rgb[0], 1.204784, epsilon = 1e-5);
        assert_relative_eq!(rgb[1], 0.948301, epsilon = 1e-5);
        assert_relative_eq!(rgb[2], 0.908842, epsilon = 1e-5);
    }

    #[test]
    fn picks_columns() {
        let rgb = apply(&XYZ_TO_ADOBE_RGB, [0.0, 1.0, 0.0]);
        assert_eq!(rgb, [-0.564946, 1.876011, -0.118390]);
    }
}

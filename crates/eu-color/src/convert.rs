//! Color space conversion.
//!
//! Input is either displayed as stored ([`InputSpace::Passthrough`]) or read
//! as linear CIE 1931 XYZ (illuminant E) and converted to one of the
//! [`OutputSpace`]s.
//!
//! ```text
//! Passthrough ────────────────────────────────────────► unchanged
//! Xyz ──► Xyz       identity
//!     ──► Rec709    XYZ_TO_REC709                       (linear)
//!     ──► Srgb      XYZ_TO_REC709    ──► toe + gamma
//!     ──► AdobeRgb  XYZ_TO_ADOBE_RGB ──► x^(1/2.19921875)
//!     ──► Custom    CustomProfile::xyz_to_rgb           (or unchanged)
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{ColorError, ColorResult};
use crate::matrix::{self, XYZ_TO_ADOBE_RGB, XYZ_TO_REC709};
use crate::transfer::{ToeGamma, adobe_rgb_oetf, signed_pow};

/// How the stored floats are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputSpace {
    /// Display the stored values as RGB, no conversion and no gamut mapping.
    #[default]
    Passthrough,
    /// Linear XYZ.
    Xyz,
}

impl InputSpace {
    /// Name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Xyz => "xyz",
        }
    }

    /// All input spaces.
    pub const fn all() -> &'static [Self] {
        &[Self::Passthrough, Self::Xyz]
    }
}

impl FromStr for InputSpace {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "passthrough" | "none" => Ok(Self::Passthrough),
            "xyz" => Ok(Self::Xyz),
            _ => Err(ColorError::unknown("input color space", s, "passthrough, xyz")),
        }
    }
}

impl fmt::Display for InputSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display encoding produced from XYZ input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputSpace {
    /// XYZ shown as RGB.
    Xyz,
    /// Linear Rec.709 primaries.
    Rec709,
    /// Rec.709 primaries with the sRGB-style toe + gamma curve.
    #[default]
    Srgb,
    /// AdobeRGB (1998).
    AdobeRgb,
    /// The registered [`CustomProfile`].
    Custom,
}

impl OutputSpace {
    /// Name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xyz => "xyz",
            Self::Rec709 => "rec709",
            Self::Srgb => "srgb",
            Self::AdobeRgb => "adobergb",
            Self::Custom => "custom",
        }
    }

    /// All output spaces.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Xyz,
            Self::Rec709,
            Self::Srgb,
            Self::AdobeRgb,
            Self::Custom,
        ]
    }
}

impl FromStr for OutputSpace {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "xyz" => Ok(Self::Xyz),
            "rec709" => Ok(Self::Rec709),
            "srgb" => Ok(Self::Srgb),
            "adobergb" | "adobe-rgb" => Ok(Self::AdobeRgb),
            "custom" => Ok(Self::Custom),
            _ => Err(ColorError::unknown(
                "output color space",
                s,
                "xyz, rec709, srgb, adobergb, custom",
            )),
        }
    }
}

impl fmt::Display for OutputSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display profile plugged in as [`OutputSpace::Custom`].
///
/// Called once per pixel from the sampler, possibly from several threads.
pub trait CustomProfile: Send + Sync {
    /// Converts linear XYZ to encoded display RGB.
    fn xyz_to_rgb(&self, xyz: [f32; 3]) -> [f32; 3];

    /// Short human readable name for logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Matrix + power law display profile.
///
/// Applies `matrix` with the same convention as [`matrix::apply`] and then
/// `sign(x) * |x|^(1/gamma)` per channel.
///
/// # Example
///
/// ```rust
/// use eu_color::{CustomProfile, MatrixProfile};
///
/// let profile = MatrixProfile::by_name("rec2020").unwrap();
/// let rgb = profile.xyz_to_rgb([0.0, 0.0, 0.0]);
/// assert_eq!(rgb, [0.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixProfile {
    name: String,
    /// XYZ to linear RGB, row-major.
    pub matrix: [f32; 9],
    /// Display gamma; the encoding exponent is `1 / gamma`.
    pub gamma: f32,
}

impl MatrixProfile {
    /// Preset names understood by [`MatrixProfile::by_name`].
    pub const PRESETS: &'static [&'static str] = &["srgb", "rec2020", "lenovo-e145"];

    /// Creates a profile from a matrix and display gamma.
    pub fn new(name: impl Into<String>, matrix: [f32; 9], gamma: f32) -> Self {
        Self {
            name: name.into(),
            matrix,
            gamma,
        }
    }

    /// sRGB display as measured by argyll's reference `sRGB.icm`.
    #[rustfmt::skip]
    pub fn srgb_display() -> Self {
        Self::new("srgb", [
            3.240_982_5, -1.537_461_2, -0.498_639_34,
            -0.969_282_8, 1.875_991, 0.041_561_245,
            0.055_660_836, -0.203_994_85, 1.057_363_5,
        ], 2.2)
    }

    /// Rec.2020 primaries.
    #[rustfmt::skip]
    pub fn rec2020() -> Self {
        Self::new("rec2020", [
            1.716_651_2, -0.355_670_78, -0.253_366_28,
            -0.666_684_35, 1.616_481_2, 0.015_768_546,
            0.017_639_857, -0.042_770_613, 0.942_103_1,
        ], 2.2)
    }

    /// Measured Lenovo E145 laptop panel.
    #[rustfmt::skip]
    pub fn lenovo_e145() -> Self {
        Self::new("lenovo-e145", [
            3.925_705_7, -2.144_248_7, -0.552_986_6,
            -1.345_528_9, 2.310_759, -0.021_100_75,
            -0.278_133_23, -0.034_211_14, 1.175_198_4,
        ], 2.2)
    }

    /// Looks up a preset by name (case-insensitive).
    pub fn by_name(name: &str) -> ColorResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "srgb" => Ok(Self::srgb_display()),
            "rec2020" => Ok(Self::rec2020()),
            "lenovo-e145" | "lenovo_e145" => Ok(Self::lenovo_e145()),
            _ => Err(ColorError::unknown(
                "profile",
                name,
                "srgb, rec2020, lenovo-e145",
            )),
        }
    }
}

impl CustomProfile for MatrixProfile {
    fn xyz_to_rgb(&self, xyz: [f32; 3]) -> [f32; 3] {
        let inv = 1.0 / self.gamma;
        matrix::apply(&self.matrix, xyz).map(|v| signed_pow(v, inv))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Resolved conversion for one (input, output) pair.
///
/// Built once per frame; [`Converter::apply`] runs per pixel.
#[derive(Clone)]
pub struct Converter {
    input: InputSpace,
    output: OutputSpace,
    toe: Option<ToeGamma>,
    profile: Option<Arc<dyn CustomProfile>>,
}

impl Converter {
    /// Resolves the stage for `input` to `output`.
    pub fn new(input: InputSpace, output: OutputSpace) -> Self {
        let toe = (output == OutputSpace::Srgb).then(ToeGamma::srgb);
        Self {
            input,
            output,
            toe,
            profile: None,
        }
    }

    /// Attaches the profile used for [`OutputSpace::Custom`].
    pub fn with_profile(mut self, profile: Arc<dyn CustomProfile>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Input space.
    pub fn input(&self) -> InputSpace {
        self.input
    }

    /// Output space.
    pub fn output(&self) -> OutputSpace {
        self.output
    }

    /// Name of the attached profile, if any.
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref().map(|p| p.name())
    }

    /// Returns `true` if [`Converter::apply`] leaves values unchanged.
    pub fn is_identity(&self) -> bool {
        match (self.input, self.output) {
            (InputSpace::Passthrough, _) | (_, OutputSpace::Xyz) => true,
            (_, OutputSpace::Custom) => self.profile.is_none(),
            _ => false,
        }
    }

    /// Converts one triple.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        if self.input == InputSpace::Passthrough {
            return rgb;
        }
        match self.output {
            OutputSpace::Xyz => rgb,
            OutputSpace::Rec709 => matrix::apply(&XYZ_TO_REC709, rgb),
            OutputSpace::Srgb => {
                let lin = matrix::apply(&XYZ_TO_REC709, rgb);
                match &self.toe {
                    Some(toe) => lin.map(|v| toe.eval(v)),
                    None => lin,
                }
            }
            OutputSpace::AdobeRgb => matrix::apply(&XYZ_TO_ADOBE_RGB, rgb).map(adobe_rgb_oetf),
            OutputSpace::Custom => match &self.profile {
                Some(profile) => profile.xyz_to_rgb(rgb),
                None => rgb,
            },
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(InputSpace::default(), OutputSpace::default())
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("profile", &self.profile_name())
            .finish()
    }
}

/// Converts one triple without a custom profile.
///
/// Convenience over [`Converter`]; prefer building a [`Converter`] once when
/// converting many pixels.
pub fn convert(rgb: [f32; 3], input: InputSpace, output: OutputSpace) -> [f32; 3] {
    Converter::new(input, output).apply(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GREY: [f32; 3] = [1.0 / 3.0; 3];

    #[test]
    fn passthrough_ignores_output() {
        let v = [0.2, -0.4, 7.0];
        for &out in OutputSpace::all() {
            assert_eq!(convert(v, InputSpace::Passthrough, out), v);
        }
    }

    #[test]
    fn xyz_identity() {
        assert_eq!(convert(GREY, InputSpace::Xyz, OutputSpace::Xyz), GREY);
    }

    #[test]
    fn adobe_rgb_equal_energy() {
        let rgb = convert(GREY, InputSpace::Xyz, OutputSpace::AdobeRgb);
        let lin = matrix::apply(&XYZ_TO_ADOBE_RGB, GREY);
        assert_relative_eq!(lin[0], 0.377243, epsilon = 1e-5);
        assert_relative_eq!(lin[1], 0.316100, epsilon = 1e-5);
        assert_relative_eq!(lin[2], 0.303489, epsilon = 1e-5);
        for (enc, l) in rgb.iter().zip(lin) {
            assert_relative_eq!(*enc, l.powf(1.0 / 2.199_218_75), epsilon = 1e-5);
        }
        let max = rgb.iter().cloned().fold(f32::MIN, f32::max);
        let min = rgb.iter().cloned().fold(f32::MAX, f32::min);
        assert!(max - min < 0.08, "{rgb:?}");
    }

    #[test]
    fn srgb_is_rec709_plus_curve() {
        let xyz = [0.4, 0.3, 0.2];
        let lin = convert(xyz, InputSpace::Xyz, OutputSpace::Rec709);
        let enc = convert(xyz, InputSpace::Xyz, OutputSpace::Srgb);
        let toe = ToeGamma::srgb();
        for k in 0..3 {
            assert_relative_eq!(enc[k], toe.eval(lin[k]), epsilon = 1e-6);
        }
    }

    #[test]
    fn custom_without_profile_passes_through() {
        let conv = Converter::new(InputSpace::Xyz, OutputSpace::Custom);
        assert!(conv.is_identity());
        assert_eq!(conv.apply([0.1, 0.2, 0.3]), [0.1, 0.2, 0.3]);
    }

    #[test]
    fn custom_uses_profile() {
        let profile = Arc::new(MatrixProfile::new("unit", matrix::IDENTITY, 1.0));
        let conv = Converter::new(InputSpace::Xyz, OutputSpace::Custom).with_profile(profile);
        assert!(!conv.is_identity());
        assert_eq!(conv.profile_name(), Some("unit"));
        assert_eq!(conv.apply([0.25, -0.5, 1.0]), [0.25, -0.5, 1.0]);
    }

    #[test]
    fn matrix_profile_keeps_sign() {
        let p = MatrixProfile::new("g2", matrix::IDENTITY, 2.0);
        let rgb = p.xyz_to_rgb([0.25, -0.25, 0.0]);
        assert_relative_eq!(rgb[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(rgb[1], -0.5, epsilon = 1e-6);
    }

    #[test]
    fn presets_resolve() {
        for name in MatrixProfile::PRESETS {
            let p = MatrixProfile::by_name(name).unwrap();
            assert_eq!(p.name(), *name);
            assert_eq!(p.gamma, 2.2);
        }
        assert!(MatrixProfile::by_name("cmyk").is_err());
    }

    #[test]
    fn parse_names() {
        for &s in OutputSpace::all() {
            assert_eq!(s.name().parse::<OutputSpace>().unwrap(), s);
        }
        for &s in InputSpace::all() {
            assert_eq!(s.to_string().parse::<InputSpace>().unwrap(), s);
        }
        assert_eq!("AdobeRGB".parse::<OutputSpace>().unwrap(), OutputSpace::AdobeRgb);
        let err = "lab".parse::<OutputSpace>().unwrap_err();
        assert!(err.to_string().contains("lab"));
    }
}

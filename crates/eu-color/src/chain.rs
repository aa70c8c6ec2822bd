//! Conversion settings and the resolved per-frame transform chain.

use std::sync::Arc;

use tracing::trace;

use crate::channels::Channels;
use crate::convert::{Converter, CustomProfile, InputSpace, OutputSpace};
use crate::curve::Curve;
use crate::error::GamutError;
use crate::gamut::{GamutMap, MarkCounter};

/// User-facing color settings, mutated between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConversionSettings {
    /// Exposure in stops.
    pub exposure: f32,
    /// Interpretation of the stored floats.
    pub colorin: InputSpace,
    /// Display encoding.
    pub colorout: OutputSpace,
    /// Tone curve.
    pub curve: Curve,
    /// Out-of-gamut policy.
    pub gamut: GamutMap,
    /// Channel preview.
    pub channels: Channels,
}

impl ConversionSettings {
    /// Exposure factor `2^exposure`.
    #[inline]
    pub fn exposure_factor(&self) -> f32 {
        self.exposure.exp2()
    }
}

/// Settings resolved once per frame into a per-pixel function.
///
/// ```rust
/// use eu_color::{ConversionSettings, MarkCounter, TransformChain};
///
/// let settings = ConversionSettings { exposure: 1.0, ..Default::default() };
/// let chain = TransformChain::new(&settings, 1.0);
/// assert_eq!(chain.apply([0.5; 3], &MarkCounter::new()).unwrap(), [255; 3]);
/// ```
#[derive(Debug, Clone)]
pub struct TransformChain {
    factor: f32,
    converter: Converter,
    gamut: Option<GamutMap>,
    curve: Curve,
    channels: Channels,
}

impl TransformChain {
    /// Resolves `settings` for a source with the given `gain`.
    pub fn new(settings: &ConversionSettings, gain: f32) -> Self {
        let passthrough = settings.colorin == InputSpace::Passthrough;
        trace!(
            "chain: exposure={} gain={} {} -> {} gamut={} curve={} channels={}",
            settings.exposure,
            gain,
            settings.colorin,
            settings.colorout,
            settings.gamut,
            settings.curve,
            settings.channels
        );
        Self {
            factor: settings.exposure_factor() * gain,
            converter: Converter::new(settings.colorin, settings.colorout),
            gamut: (!passthrough).then_some(settings.gamut),
            curve: settings.curve,
            channels: settings.channels,
        }
    }

    /// Uses `profile` for [`OutputSpace::Custom`].
    pub fn with_profile(mut self, profile: Arc<dyn CustomProfile>) -> Self {
        self.converter = self.converter.with_profile(profile);
        self
    }

    /// Combined exposure and gain multiplier.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// The resolved conversion stage.
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Runs exposure, conversion, gamut mapping, curve and channel isolation.
    ///
    /// Fails only when [`GamutMap::Project`] meets a blend factor outside
    /// `[0, 1]`; callers decide what to draw instead.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3], marks: &MarkCounter) -> Result<[u8; 3], GamutError> {
        let exposed = rgb.map(|v| v * self.factor);
        let mut converted = self.converter.apply(exposed);
        if let Some(gamut) = self.gamut {
            converted = gamut.apply(converted, marks)?;
        }
        let bytes = self.curve.encode(converted, self.channels);
        if self.curve.is_pseudocolor() {
            Ok(bytes)
        } else {
            Ok(self.channels.isolate(bytes))
        }
    }
}

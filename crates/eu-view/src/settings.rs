//! Per-frame view settings and the long-lived viewing session.

use std::fmt;
use std::sync::Arc;

use eu_color::{ConversionSettings, CustomProfile, MarkCounter, TransformChain};
use eu_core::{OutputBuffer, OutputRect, Roi};

/// Everything the sampler needs besides the source and the buffer.
///
/// Mutated freely between grabs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewSettings {
    /// Window into the input image.
    pub roi: Roi,
    /// Destination rectangle inside the output buffer.
    pub roi_out: OutputRect,
    /// Color settings.
    pub color: ConversionSettings,
}

impl ViewSettings {
    /// Default color settings, 1:1 at the origin, drawing into `roi_out`.
    pub fn new(roi_out: OutputRect) -> Self {
        Self {
            roi_out,
            ..Default::default()
        }
    }

    /// Settings covering the whole of `buf`.
    pub fn for_buffer(buf: &OutputBuffer) -> Self {
        Self::new(buf.bounds())
    }

    /// Replaces the region of interest.
    pub fn with_roi(mut self, roi: Roi) -> Self {
        self.roi = roi;
        self
    }

    /// Replaces the color settings.
    pub fn with_color(mut self, color: ConversionSettings) -> Self {
        self.color = color;
        self
    }
}

/// State that outlives single frames: the gamut mark counter and the
/// custom display profile.
///
/// ```rust
/// use std::sync::Arc;
/// use eu_color::MatrixProfile;
/// use eu_view::Session;
///
/// let session = Session::new().with_profile(Arc::new(MatrixProfile::rec2020()));
/// assert_eq!(session.profile_name(), Some("rec2020"));
/// ```
#[derive(Default)]
pub struct Session {
    marks: MarkCounter,
    profile: Option<Arc<dyn CustomProfile>>,
}

impl Session {
    /// Session without a custom profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the profile used for the `custom` output space.
    pub fn with_profile(mut self, profile: Arc<dyn CustomProfile>) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Replaces or removes the custom profile.
    pub fn set_profile(&mut self, profile: Option<Arc<dyn CustomProfile>>) {
        self.profile = profile;
    }

    /// Name of the registered profile.
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref().map(|p| p.name())
    }

    /// Gamut mark counter shared by all frames of this session.
    pub fn marks(&self) -> &MarkCounter {
        &self.marks
    }

    /// Resolves the transform chain for one frame.
    pub fn chain(&self, color: &ConversionSettings, gain: f32) -> TransformChain {
        let chain = TransformChain::new(color, gain);
        match &self.profile {
            Some(profile) => chain.with_profile(Arc::clone(profile)),
            None => chain,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("marks", &self.marks.count())
            .field("profile", &self.profile_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eu_color::{InputSpace, OutputSpace};

    #[test]
    fn defaults() {
        let s = ViewSettings::default();
        assert_eq!(s.roi, Roi::new(0.0, 0.0, 1.0));
        assert_eq!(s.color.colorin, InputSpace::Passthrough);
        assert_eq!(s.color.colorout, OutputSpace::Srgb);
        assert!(s.roi_out.is_empty());
    }

    #[test]
    fn for_buffer_covers_buffer() {
        let buf = OutputBuffer::new(64, 32).unwrap();
        let s = ViewSettings::for_buffer(&buf);
        assert_eq!(s.roi_out, OutputRect::new(0, 0, 64, 32));
    }

    #[test]
    fn session_chain_without_profile_is_identity_for_custom() {
        let session = Session::new();
        let color = ConversionSettings {
            colorin: InputSpace::Xyz,
            colorout: OutputSpace::Custom,
            ..Default::default()
        };
        assert!(session.chain(&color, 1.0).converter().is_identity());
        assert_eq!(session.profile_name(), None);
    }
}

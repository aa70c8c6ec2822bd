//! Single-channel preview.

use std::fmt;
use std::str::FromStr;

use crate::error::{ColorError, ColorResult};

/// Which channel(s) end up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Channels {
    /// Red replicated to grey.
    Red = 0,
    /// Green replicated to grey.
    Green = 1,
    /// Blue replicated to grey.
    Blue = 2,
    /// Full color.
    #[default]
    Rgb = 3,
}

impl Channels {
    /// Numeric value: 0, 1, 2 for a single channel, 3 for all.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Rgb => "rgb",
        }
    }

    /// All modes.
    pub const fn all() -> &'static [Self] {
        &[Self::Red, Self::Green, Self::Blue, Self::Rgb]
    }

    /// Replicates the selected byte to all three; [`Channels::Rgb`] is a no-op.
    ///
    /// ```rust
    /// use eu_color::Channels;
    ///
    /// assert_eq!(Channels::Red.isolate([10, 20, 30]), [10, 10, 10]);
    /// assert_eq!(Channels::Rgb.isolate([10, 20, 30]), [10, 20, 30]);
    /// ```
    #[inline]
    pub fn isolate(self, bytes: [u8; 3]) -> [u8; 3] {
        match self {
            Self::Rgb => bytes,
            single => [bytes[single.index()]; 3],
        }
    }
}

impl FromStr for Channels {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "g" | "green" => Ok(Self::Green),
            "b" | "blue" => Ok(Self::Blue),
            "rgb" | "all" | "color" => Ok(Self::Rgb),
            _ => Err(ColorError::unknown("channel", s, "red, green, blue, rgb")),
        }
    }
}

impl fmt::Display for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

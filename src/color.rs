//! Colour values as stored in the configuration.
//!
//! The core treats a [`HexColor`] as opaque: any string is accepted and
//! round-trips unchanged.  Only the boundary (controls and rendering) tries to
//! interpret it, via [`HexColor::to_color`].

use bevy::color::{Color, Srgba};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a render colour.  Returns `None` for anything that is not
    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn to_color(&self) -> Option<Color> {
        Srgba::hex(self.0.trim()).ok().map(Color::from)
    }

    /// `true` for the canonical `#rrggbb` form written by colour pickers.
    pub fn is_canonical(&self) -> bool {
        let Some(digits) = self.0.strip_prefix('#') else {
            return false;
        };
        digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl From<&str> for HexColor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HexColor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

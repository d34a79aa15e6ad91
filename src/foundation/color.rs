use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{OtfbmError, OtfbmResult};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque white, the background used when flattening decoded images.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl FromStr for Color {
    type Err = OtfbmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// Parse a strict `RRGGBBAA` hex color.
///
/// Exactly eight hex digits, case-insensitive. No `#` prefix, no short forms, no surrounding
/// whitespace.
pub fn parse_color(s: &str) -> OtfbmResult<Color> {
    let bytes = s.as_bytes();
    if bytes.len() != 8 {
        return Err(OtfbmError::color_format(format!(
            "expected 8 hex digits (RRGGBBAA), got {} bytes in \"{}\"",
            bytes.len(),
            s.escape_debug()
        )));
    }
    if let Some(pos) = bytes.iter().position(|b| !b.is_ascii_hexdigit()) {
        return Err(OtfbmError::color_format(format!(
            "invalid hex digit at offset {pos} in \"{}\"",
            s.escape_debug()
        )));
    }

    let mut channels = [0u8; 4];
    for (channel, i) in channels.iter_mut().zip([0usize, 2, 4, 6]) {
        *channel = u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| {
            OtfbmError::color_format(format!(
                "invalid hex pair at offset {i} in \"{}\": {e}",
                s.escape_debug()
            ))
        })?;
    }
    let [r, g, b, a] = channels;
    Ok(Color::rgba(r, g, b, a))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;

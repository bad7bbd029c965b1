//! Color values
//!
//! A color is either three 8-bit channels or `Auto`, which defers to whatever
//! the rendering context considers the default (black text, white paper).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// RGB color or the automatic sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    /// Inherit from the rendering context.
    #[default]
    Auto,
    /// Explicit red, green and blue channels.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GREEN: Color = Color::Rgb(0, 128, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const GRAY: Color = Color::Rgb(128, 128, 128);

    /// Build a color from unchecked channel values.
    ///
    /// # Errors
    /// Returns [`ReportError::ChannelOutOfRange`] if any channel is outside `0..=255`.
    pub fn from_channels(r: i32, g: i32, b: i32) -> Result<Self> {
        Ok(Color::Rgb(channel('r', r)?, channel('g', g)?, channel('b', b)?))
    }

    /// Parse `#RRGGBB` (the leading `#` is optional). `"auto"` parses to [`Color::Auto`].
    ///
    /// Eight-digit ARGB values drop the alpha byte, as spreadsheet files store them.
    ///
    /// # Errors
    /// Returns [`ReportError::InvalidHexColor`] for anything else.
    pub fn from_hex(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Color::Auto);
        }
        let hex = trimmed.trim_start_matches('#');
        let rgb = match hex.len() {
            6 => hex,
            8 => hex.get(2..).unwrap_or_default(),
            _ => return Err(ReportError::InvalidHexColor(text.to_string())),
        };
        let parse = |range: std::ops::Range<usize>| {
            rgb.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| ReportError::InvalidHexColor(text.to_string()))
        };
        Ok(Color::Rgb(parse(0..2)?, parse(2..4)?, parse(4..6)?))
    }

    /// Format as `#RRGGBB`, or `auto`.
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Color::Auto)
    }

    /// Channels, or `None` for `Auto`.
    pub fn rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Auto => None,
            Color::Rgb(r, g, b) => Some((r, g, b)),
        }
    }

    /// Replace `Auto` with a concrete fallback.
    pub fn or(self, fallback: Color) -> Color {
        if self.is_auto() {
            fallback
        } else {
            self
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => f.write_str("auto"),
            Color::Rgb(r, g, b) => write!(f, "#{r:02X}{g:02X}{b:02X}"),
        }
    }
}

fn channel(name: char, value: i32) -> Result<u8> {
    u8::try_from(value).map_err(|_| ReportError::ChannelOutOfRange {
        channel: name,
        value,
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels() {
        assert_eq!(Color::from_channels(0, 128, 255).unwrap(), Color::Rgb(0, 128, 255));
        assert!(Color::from_channels(256, 0, 0).is_err());
        assert!(Color::from_channels(0, -1, 0).is_err());
        match Color::from_channels(0, 0, 300) {
            Err(ReportError::ChannelOutOfRange { channel, value }) => {
                assert_eq!(channel, 'b');
                assert_eq!(value, 300);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_hex_roundtrip() {
        let test_cases = [
            ("#FF0000", Color::RED),
            ("00FF00", Color::Rgb(0, 255, 0)),
            ("#0000ff", Color::BLUE),
            ("FF808080", Color::GRAY), // ARGB
            ("auto", Color::Auto),
        ];

        for (input, expected) in test_cases {
            assert_eq!(Color::from_hex(input).unwrap(), expected, "parsing {input}");
        }

        assert_eq!(Color::RED.to_hex(), "#FF0000");
        assert_eq!(Color::Auto.to_hex(), "auto");
    }

    #[test]
    fn test_hex_invalid() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_auto_equality() {
        assert_eq!(Color::Auto, Color::default());
        assert_ne!(Color::Auto, Color::BLACK);
        assert_eq!(Color::Auto.or(Color::WHITE), Color::WHITE);
        assert_eq!(Color::RED.or(Color::WHITE), Color::RED);
        assert_eq!(Color::Auto.rgb(), None);
    }
}

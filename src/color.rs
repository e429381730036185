use std::fmt;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DisplayColor – the per-sample display attribute
// ---------------------------------------------------------------------------

/// 8-bit sRGB colour, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const GRAY: DisplayColor = DisplayColor::from_rgb(160, 160, 160);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Default for DisplayColor {
    fn default() -> Self {
        Self::GRAY
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<DisplayColor> for String {
    fn from(c: DisplayColor) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for DisplayColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DisplayColor::from_hex(&s).ok_or_else(|| format!("invalid colour '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<DisplayColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            DisplayColor::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn first_hue_is_red_dominant() {
        let c = generate_palette(3)[0];
        assert!(c.r > c.g && c.r > c.b);
    }

    #[test]
    fn hex_text_round_trips() {
        let c = DisplayColor::from_rgb(0x12, 0xab, 0xff);
        assert_eq!(c.to_string(), "#12abff");
        assert_eq!(DisplayColor::from_hex("#12abff"), Some(c));
        assert_eq!(DisplayColor::from_hex("12abff"), Some(c));
        assert_eq!(DisplayColor::from_hex("#12ab"), None);
        assert_eq!(DisplayColor::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&DisplayColor::from_rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: DisplayColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DisplayColor::from_rgb(255, 0, 16));
    }
}

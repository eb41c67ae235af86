//! RGBA colors with CSS-style name and hex parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
///
/// Deserializes from a CSS color keyword (`"green"`), a hex string
/// (`"#f80"`, `"#ff8800"`, `"#ff8800cc"`) or an `[r, g, b]` / `[r, g, b, a]`
/// array, and serializes to a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorInput", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear interpolation between two colors in RGBA space.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        let lerp_u8 =
            |a: u8, b: u8| -> u8 { ((a as f64) * (1.0 - t) + (b as f64) * t).round() as u8 };

        Color {
            r: lerp_u8(self.r, other.r),
            g: lerp_u8(self.g, other.g),
            b: lerp_u8(self.b, other.b),
            a: lerp_u8(self.a, other.a),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.hex()
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex_color(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }
        named_color(s).ok_or_else(|| ColorParseError::UnknownName(s.to_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorInput {
    Text(String),
    Array(Vec<u8>),
}

impl TryFrom<ColorInput> for Color {
    type Error = ColorParseError;

    fn try_from(input: ColorInput) -> Result<Self, Self::Error> {
        match input {
            ColorInput::Text(s) => s.parse(),
            ColorInput::Array(arr) => match arr.as_slice() {
                [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::rgba(*r, *g, *b, *a)),
                _ => Err(ColorParseError::InvalidArray(arr.len())),
            },
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    if !s.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&s[i..i + 1], 16).ok().map(|v| v * 17);

    match s.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// CSS color keywords most often used for age ramps.
fn named_color(name: &str) -> Option<Color> {
    let c = match name.to_lowercase().as_str() {
        "transparent" => Color::transparent(),
        "black" => Color::rgb(0, 0, 0),
        "white" => Color::rgb(255, 255, 255),
        "red" => Color::rgb(255, 0, 0),
        "darkred" => Color::rgb(139, 0, 0),
        "maroon" => Color::rgb(128, 0, 0),
        "green" => Color::rgb(0, 128, 0),
        "darkgreen" => Color::rgb(0, 100, 0),
        "lime" => Color::rgb(0, 255, 0),
        "olive" => Color::rgb(128, 128, 0),
        "blue" => Color::rgb(0, 0, 255),
        "navy" => Color::rgb(0, 0, 128),
        "teal" => Color::rgb(0, 128, 128),
        "yellow" => Color::rgb(255, 255, 0),
        "gold" => Color::rgb(255, 215, 0),
        "orange" => Color::rgb(255, 165, 0),
        "cyan" | "aqua" => Color::rgb(0, 255, 255),
        "magenta" | "fuchsia" => Color::rgb(255, 0, 255),
        "purple" => Color::rgb(128, 0, 128),
        "indigo" => Color::rgb(75, 0, 130),
        "violet" => Color::rgb(238, 130, 238),
        "pink" => Color::rgb(255, 192, 203),
        "brown" => Color::rgb(165, 42, 42),
        "silver" => Color::rgb(192, 192, 192),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        _ => return None,
    };
    Some(c)
}

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorParseError {
    #[error("Unknown color name: {0}")]
    UnknownName(String),

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Color array must have 3 or 4 components, got {0}")]
    InvalidArray(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("#FF5500".parse::<Color>().unwrap(), Color::rgb(255, 85, 0));
        assert_eq!("#f50".parse::<Color>().unwrap(), Color::rgb(255, 85, 0));
        assert_eq!(
            "#ff550080".parse::<Color>().unwrap(),
            Color::rgba(255, 85, 0, 128)
        );
        assert_eq!("Green".parse::<Color>().unwrap(), Color::rgb(0, 128, 0));
        assert!(matches!(
            "chartreuse-ish".parse::<Color>(),
            Err(ColorParseError::UnknownName(_))
        ));
        assert!(matches!(
            "#12345".parse::<Color>(),
            Err(ColorParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_color_serde() {
        let colors: Vec<Color> =
            serde_json::from_str(r##"["yellow", "#0000ff", [1, 2, 3], [1, 2, 3, 4]]"##).unwrap();
        assert_eq!(colors[0], Color::rgb(255, 255, 0));
        assert_eq!(colors[1], Color::rgb(0, 0, 255));
        assert_eq!(colors[2], Color::rgb(1, 2, 3));
        assert_eq!(colors[3], Color::rgba(1, 2, 3, 4));

        let json = serde_json::to_string(&Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
    }

    #[test]
    fn test_lerp_midpoint() {
        let c = Color::rgb(0, 0, 0).lerp(&Color::rgb(255, 255, 255), 0.5);
        assert_eq!(c, Color::rgb(128, 128, 128));
    }
}

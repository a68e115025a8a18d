//! `#rrggbb` colors and the channel-wise interpolation used for dots and trails.

use crate::foundation::error::{DotfieldError, DotfieldResult};
use crate::foundation::math::clamp01;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct from channel bytes.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (case-insensitive, leading `#` optional).
    pub fn parse_hex(s: &str) -> DotfieldResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(DotfieldError::validation(format!(
                "color \"{s}\" must be #rrggbb"
            )));
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                DotfieldError::validation(format!("color \"{s}\" has invalid hex digits"))
            })
        };
        Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS functional notation, e.g. `rgb(249, 115, 22)`.
    pub fn to_css(self) -> String {
        self.to_string()
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb8 {
    type Err = DotfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Per-channel `round(a + (b - a) * t)` with `t` clamped to `[0, 1]`.
pub fn lerp_rgb(a: Rgb8, b: Rgb8, t: f64) -> Rgb8 {
    let t = clamp01(t);
    let ch = |a: u8, b: u8| {
        let a = f64::from(a);
        let b = f64::from(b);
        (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
    };
    Rgb8::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b))
}

/// Interpolate two hex colors and return the result as a CSS `rgb()` string.
pub fn lerp_color(a: &str, b: &str, t: f64) -> DotfieldResult<String> {
    Ok(lerp_rgb(Rgb8::parse_hex(a)?, Rgb8::parse_hex(b)?, t).to_css())
}

/// Sample evenly spaced gradient stops at `t`.
///
/// Returns `None` for an empty gradient; a single stop is a flat color.
pub fn sample_gradient(stops: &[Rgb8], t: f64) -> Option<Rgb8> {
    match stops {
        [] => None,
        [only] => Some(*only),
        _ => {
            let span = (stops.len() - 1) as f64;
            let pos = clamp01(t) * span;
            let i = (pos.floor() as usize).min(stops.len() - 2);
            Some(lerp_rgb(stops[i], stops[i + 1], pos - i as f64))
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/color.rs"]
mod tests;

//! CSS color parsing

use std::fmt;
use std::str::FromStr;

use crate::error::ChartError;

/// RGBA color, alpha in 0..=1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Used when a dataset carries a color we cannot read
    pub const FALLBACK: Color = Color::rgb(156, 163, 175);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse or fall back to [`Color::FALLBACK`], logging the bad input
    pub fn parse_or_fallback(css: &str) -> Self {
        css.parse().unwrap_or_else(|err| {
            log::warn!("{err}; using fallback color");
            Self::FALLBACK
        })
    }

    /// `#rrggbb` for opaque colors, `rgba(...)` otherwise
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, trim_alpha(self.a))
        }
    }
}

fn trim_alpha(a: f64) -> String {
    let text = format!("{:.3}", a);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Color {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = || ChartError::InvalidColor(s.to_string());

        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let lower = input.to_ascii_lowercase();
        let body = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(invalid());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        let a = match parts.get(3) {
            Some(p) => p.parse::<f64>().map_err(|_| invalid())?,
            None => 1.0,
        };
        Ok(Color {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: a.clamp(0.0, 1.0),
        })
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

    match hex.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f64 / 255.0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!("#60a5fa".parse::<Color>().unwrap(), Color::rgb(0x60, 0xa5, 0xfa));
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        let transparent: Color = "#60a5fa00".parse().unwrap();
        assert_eq!(transparent.a, 0.0);
    }

    #[test]
    fn parses_rgba() {
        let color: Color = "rgba(96, 165, 250, 0.1)".parse().unwrap();
        assert_eq!((color.r, color.g, color.b), (96, 165, 250));
        assert!((color.a - 0.1).abs() < 1e-12);
    }

    #[test]
    fn css_output_depends_on_alpha() {
        let blue = Color::rgb(96, 165, 250);
        assert_eq!(blue.to_css(), "#60a5fa");
        assert_eq!(blue.with_alpha(0.5).to_css(), "rgba(96, 165, 250, 0.5)");
        assert_eq!(blue.with_alpha(0.0).to_css(), "rgba(96, 165, 250, 0)");
    }

    #[test]
    fn garbage_falls_back() {
        assert!("teal-ish".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert_eq!(Color::parse_or_fallback("nope"), Color::FALLBACK);
    }
}

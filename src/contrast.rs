//! WCAG Contrast - Text Readability Checks
//!
//! Pure numeric code: no file I/O. Ratios range from 1.0 (identical colors)
//! to 21.0 (black on white).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::validation::ValidationResult;

pub const WCAG_AA_NORMAL: f64 = 4.5;
pub const WCAG_AA_LARGE: f64 = 3.0;
pub const WCAG_AAA_NORMAL: f64 = 7.0;
pub const WCAG_AAA_LARGE: f64 = 4.5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Color '{0}' must have 6 hex digits")]
    InvalidLength(String),

    #[error("Color '{0}' contains non-hex characters")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// WCAG 2.0 relative luminance.
    pub fn relative_luminance(self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = c as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * channel(self.0) + 0.7152 * channel(self.1) + 0.0722 * channel(self.2)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

/// Parse `#RRGGBB` or `RRGGBB`.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.is_ascii() || digits.len() != 6 {
        return Err(ColorError::InvalidLength(hex.to_string()));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }

    let byte = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };

    Ok(Rgb(byte(0)?, byte(2)?, byte(4)?))
}

/// Hex colors plus the named colors the generators accept.
pub fn parse_color(s: &str) -> Result<Rgb, ColorError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "white" => Ok(Rgb::WHITE),
        "black" => Ok(Rgb::BLACK),
        _ => hex_to_rgb(s.trim()),
    }
}

pub fn calculate_contrast_ratio(a: impl Into<Rgb>, b: impl Into<Rgb>) -> f64 {
    let (a, b) = (a.into(), b.into());
    let (la, lb) = (a.relative_luminance(), b.relative_luminance());
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// AA/AAA minimums for one text size class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WcagThresholds {
    pub aa: f64,
    pub aaa: f64,
}

/// WCAG "large text": at least 18pt, or at least 14pt when bold.
/// Pixels convert to points at 0.75pt/px.
pub fn is_large_text(font_size_px: u32, is_bold: bool) -> bool {
    let pt = font_size_px as f64 * 0.75;
    pt >= 18.0 || (pt >= 14.0 && is_bold)
}

pub fn thresholds(font_size_px: u32, is_bold: bool) -> WcagThresholds {
    if is_large_text(font_size_px, is_bold) {
        WcagThresholds { aa: WCAG_AA_LARGE, aaa: WCAG_AAA_LARGE }
    } else {
        WcagThresholds { aa: WCAG_AA_NORMAL, aaa: WCAG_AAA_NORMAL }
    }
}

pub fn validate_contrast(
    text: impl Into<Rgb>,
    background: impl Into<Rgb>,
    font_size_px: u32,
    is_bold: bool,
) -> ValidationResult {
    let ratio = calculate_contrast_ratio(text, background);
    let t = thresholds(font_size_px, is_bold);

    if ratio >= t.aaa {
        ValidationResult::success(format!(
            "Contrast ratio {:.1}:1 meets WCAG AAA standards ({:.1}:1 required)",
            ratio, t.aaa
        ))
    } else if ratio >= t.aa {
        ValidationResult::success(format!(
            "Contrast ratio {:.1}:1 meets WCAG AA standards ({:.1}:1 required)",
            ratio, t.aa
        ))
    } else {
        ValidationResult::error(format!(
            "Contrast ratio {:.1}:1 fails WCAG AA standards ({:.1}:1 required)",
            ratio, t.aa
        ))
    }
}

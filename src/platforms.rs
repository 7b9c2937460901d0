//! Platform Rules - Fixed Share Targets
//!
//! Every platform maps to a constant rule. Adding a platform is a new enum
//! variant, and the exhaustive match in `Platform::rule` forces a rule for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Unknown platform: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Twitter,
    #[serde(rename = "linkedin")]
    LinkedIn,
    #[serde(rename = "whatsapp")]
    WhatsApp,
}

/// Size, geometry and format limits for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformRule {
    pub max_file_size: u64,
    pub recommended_size: (u32, u32),
    pub min_size: (u32, u32),
    pub aspect_ratio: f64,
    pub formats: &'static [&'static str],
}

const BASIC_FORMATS: &[&str] = &["png", "jpg", "jpeg"];
const WEB_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

const FACEBOOK: PlatformRule = PlatformRule {
    max_file_size: 8 * MIB,
    recommended_size: (1200, 630),
    min_size: (600, 315),
    aspect_ratio: 1.91,
    formats: BASIC_FORMATS,
};

const TWITTER: PlatformRule = PlatformRule {
    max_file_size: 5 * MIB,
    recommended_size: (1200, 675),
    min_size: (300, 157),
    aspect_ratio: 16.0 / 9.0,
    formats: WEB_FORMATS,
};

// The minimum is one pixel taller than the recommended size. Kept as-is so
// existing consumers see the same verdicts.
const LINKEDIN: PlatformRule = PlatformRule {
    max_file_size: 5 * MIB,
    recommended_size: (1200, 627),
    min_size: (1200, 628),
    aspect_ratio: 1.91,
    formats: BASIC_FORMATS,
};

const WHATSAPP: PlatformRule = PlatformRule {
    max_file_size: 8 * MIB,
    recommended_size: (1200, 630),
    min_size: (600, 315),
    aspect_ratio: 1.91,
    formats: BASIC_FORMATS,
};

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Facebook,
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::WhatsApp,
    ];

    pub fn rule(self) -> &'static PlatformRule {
        match self {
            Platform::Facebook => &FACEBOOK,
            Platform::Twitter => &TWITTER,
            Platform::LinkedIn => &LINKEDIN,
            Platform::WhatsApp => &WHATSAPP,
        }
    }

    /// Lowercase identifier, as accepted by `FromStr`.
    pub fn id(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Facebook => "Facebook",
            Platform::Twitter => "Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::WhatsApp => "WhatsApp",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| PlatformError::Unknown(s.to_string()))
    }
}

/// Look up the rule for a platform name.
pub fn lookup(name: &str) -> Result<&'static PlatformRule, PlatformError> {
    name.parse::<Platform>().map(Platform::rule)
}

/// Pick the platforms a generated image is meant for, based on its file name.
///
/// Twitter cards are only checked against Twitter, square images against the
/// two platforms that crop them well, everything else against the 1.91:1
/// link-preview platforms.
pub fn platforms_for_filename(name: &str) -> Vec<Platform> {
    if name.contains("twitter") {
        vec![Platform::Twitter]
    } else if name.contains("square") {
        vec![Platform::Facebook, Platform::Twitter]
    } else {
        vec![Platform::Facebook, Platform::LinkedIn, Platform::WhatsApp]
    }
}

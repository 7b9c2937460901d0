//! Validator Configuration
//!
//! Thresholds and check toggles, loadable from a JSON file. Every field is
//! optional; missing fields take the documented defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::platforms::Platform;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    #[serde(default = "default_size_warning_ratio")]
    pub size_warning_ratio: f64,
    #[serde(default = "default_aspect_tolerance")]
    pub aspect_tolerance: f64,
    #[serde(default = "default_platforms")]
    pub default_platforms: Vec<Platform>,
    #[serde(default)]
    pub checks: CheckToggles,
}

fn default_true() -> bool { true }
fn default_size_warning_ratio() -> f64 { 0.8 }
fn default_aspect_tolerance() -> f64 { 0.1 }
fn default_platforms() -> Vec<Platform> { vec![Platform::Facebook, Platform::Twitter] }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckToggles {
    #[serde(default = "default_true")]
    pub file_size: bool,
    #[serde(default = "default_true")]
    pub dimensions: bool,
    #[serde(default = "default_true")]
    pub format: bool,
}

impl Default for CheckToggles {
    fn default() -> Self {
        Self {
            file_size: true,
            dimensions: true,
            format: true,
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            size_warning_ratio: default_size_warning_ratio(),
            aspect_tolerance: default_aspect_tolerance(),
            default_platforms: default_platforms(),
            checks: CheckToggles::default(),
        }
    }
}

impl ValidatorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !(self.size_warning_ratio > 0.0 && self.size_warning_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "sizeWarningRatio must be in (0, 1], got {}",
                self.size_warning_ratio
            )));
        }
        if !(self.aspect_tolerance >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "aspectTolerance must be non-negative, got {}",
                self.aspect_tolerance
            )));
        }
        if self.default_platforms.is_empty() {
            return Err(ConfigError::Invalid(
                "defaultPlatforms must name at least one platform".to_string(),
            ));
        }
        let toggles = &self.checks;
        if !(toggles.file_size || toggles.dimensions || toggles.format) {
            return Err(ConfigError::Invalid(
                "checks must enable at least one of fileSize, dimensions, format".to_string(),
            ));
        }
        Ok(())
    }
}

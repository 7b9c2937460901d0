//! Validation System - Per-Platform File Checks
//!
//! Checks produce exactly one `ValidationResult` each and never fail: missing
//! files, decode errors and unknown platforms all become error-level results
//! so a batch run keeps going past individual problems.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::config::ValidatorConfig;
use crate::platforms::Platform;
use crate::probe::{FsProbe, ImageProbe, ProbeError};
use crate::report::ValidationReport;

const MIB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationLevel {
    Success,
    Warning,
    Error,
    Info,
}

/// Outcome of a single check. `level` is independent of `passed`: a size
/// close to the limit warns but still passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub passed: bool,
    pub message: String,
    pub level: ValidationLevel,
}

impl ValidationResult {
    pub fn new(passed: bool, message: impl Into<String>, level: ValidationLevel) -> Self {
        Self {
            passed,
            message: message.into(),
            level,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(true, message, ValidationLevel::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(true, message, ValidationLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(false, message, ValidationLevel::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(true, message, ValidationLevel::Info)
    }

    pub fn is_problem(&self) -> bool {
        matches!(self.level, ValidationLevel::Warning | ValidationLevel::Error)
    }
}

/// Turn a probe failure into an error result. Missing files keep the plain
/// "File not found" wording and I/O errors already name the path; decode
/// failures name what could not be read. Everything but a missing file is
/// logged.
pub(crate) fn probe_failure(err: &ProbeError, what: &str) -> ValidationResult {
    match err {
        ProbeError::NotFound(_) => ValidationResult::error(err.to_string()),
        ProbeError::Io { .. } => {
            warn!(error = %err, "image probe failed");
            ValidationResult::error(err.to_string())
        }
        _ => {
            warn!(error = %err, "image probe failed");
            ValidationResult::error(format!("Could not read image {}: {}", what, err))
        }
    }
}

/// A single check run against one file for one platform.
pub trait PlatformCheck {
    fn name(&self) -> &'static str;
    fn check(&self, path: &Path, platform: Platform, probe: &dyn ImageProbe) -> ValidationResult;
}

// --- Concrete Checks ---

pub struct FileSizeCheck {
    pub warning_ratio: f64,
}

impl Default for FileSizeCheck {
    fn default() -> Self {
        Self { warning_ratio: 0.8 }
    }
}

impl PlatformCheck for FileSizeCheck {
    fn name(&self) -> &'static str { "file_size" }

    fn check(&self, path: &Path, platform: Platform, probe: &dyn ImageProbe) -> ValidationResult {
        let size = match probe.file_len(path) {
            Ok(n) => n,
            Err(e) => return probe_failure(&e, "size"),
        };
        let max = platform.rule().max_file_size;

        let size_mb = size as f64 / MIB;
        let max_mb = max as f64 / MIB;

        if size > max {
            ValidationResult::error(format!(
                "File size {:.1}MB exceeds {} limit of {:.0}MB",
                size_mb, platform, max_mb
            ))
        } else if size as f64 > max as f64 * self.warning_ratio {
            ValidationResult::warning(format!(
                "File size {:.1}MB is close to {} limit ({:.0}MB)",
                size_mb, platform, max_mb
            ))
        } else {
            ValidationResult::success(format!(
                "File size {:.1}MB is within {} limits",
                size_mb, platform
            ))
        }
    }
}

pub struct DimensionCheck {
    pub tolerance: f64,
}

impl Default for DimensionCheck {
    fn default() -> Self {
        Self { tolerance: 0.1 }
    }
}

impl PlatformCheck for DimensionCheck {
    fn name(&self) -> &'static str { "dimensions" }

    fn check(&self, path: &Path, platform: Platform, probe: &dyn ImageProbe) -> ValidationResult {
        let info = match probe.inspect(path) {
            Ok(info) => info,
            Err(e) => return probe_failure(&e, "dimensions"),
        };
        let rule = platform.rule();
        let (width, height) = (info.width, info.height);
        let (min_w, min_h) = rule.min_size;

        if (width, height) == rule.recommended_size {
            return ValidationResult::success(format!(
                "Dimensions {}x{} match {} recommended size",
                width, height, platform
            ));
        }

        if width < min_w || height < min_h {
            return ValidationResult::error(format!(
                "Dimensions {}x{} below {} minimum ({}x{})",
                width, height, platform, min_w, min_h
            ));
        }

        // height >= min_h > 0 here, so the division is safe.
        let actual = width as f64 / height as f64;
        let expected = rule.aspect_ratio;

        if (actual - expected).abs() > self.tolerance {
            ValidationResult::warning(format!(
                "Dimensions {}x{} have non-standard aspect ratio (expected {:.2}:1, got {:.2}:1)",
                width, height, expected, actual
            ))
        } else {
            ValidationResult::success(format!(
                "Dimensions {}x{} meet {} requirements",
                width, height, platform
            ))
        }
    }
}

pub struct FormatCheck;

impl PlatformCheck for FormatCheck {
    fn name(&self) -> &'static str { "format" }

    fn check(&self, path: &Path, platform: Platform, probe: &dyn ImageProbe) -> ValidationResult {
        let info = match probe.inspect(path) {
            Ok(info) => info,
            Err(e) => return probe_failure(&e, "format"),
        };
        let format = info.format.to_lowercase();
        let allowed = platform.rule().formats;

        if allowed.contains(&format.as_str()) {
            ValidationResult::success(format!(
                "Format {} is supported by {}",
                format.to_uppercase(),
                platform
            ))
        } else {
            ValidationResult::error(format!(
                "Format {} not supported by {} (use {})",
                format.to_uppercase(),
                platform,
                allowed.join(", ").to_uppercase()
            ))
        }
    }
}

fn unknown_platform(name: &str) -> ValidationResult {
    ValidationResult::error(format!("Unknown platform: {}", name))
}

/// Validator orchestrates checks across platforms
pub struct Validator {
    checks: Vec<Box<dyn PlatformCheck>>,
    probe: Box<dyn ImageProbe>,
    default_platforms: Vec<Platform>,
}

impl Validator {
    pub fn new(config: &ValidatorConfig) -> Self {
        let mut checks: Vec<Box<dyn PlatformCheck>> = Vec::new();

        if config.checks.file_size {
            checks.push(Box::new(FileSizeCheck {
                warning_ratio: config.size_warning_ratio,
            }));
        }
        if config.checks.dimensions {
            checks.push(Box::new(DimensionCheck {
                tolerance: config.aspect_tolerance,
            }));
        }
        if config.checks.format {
            checks.push(Box::new(FormatCheck));
        }

        Self {
            checks,
            probe: Box::new(FsProbe),
            default_platforms: config.default_platforms.clone(),
        }
    }

    pub fn with_probe(mut self, probe: impl ImageProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every enabled check for one platform name, in order.
    pub fn validate_platform(&self, path: &Path, platform: &str) -> Vec<ValidationResult> {
        let platform = match platform.parse::<Platform>() {
            Ok(p) => p,
            Err(_) => return vec![unknown_platform(platform)],
        };

        self.checks
            .iter()
            .map(|check| {
                let result = check.check(path, platform, self.probe.as_ref());
                debug!(
                    platform = platform.id(),
                    check = check.name(),
                    level = ?result.level,
                    "check finished"
                );
                result
            })
            .collect()
    }

    /// Validate a file against each named platform. An empty list means the
    /// configured default platforms.
    pub fn validate_all(&self, path: impl AsRef<Path>, platforms: &[&str]) -> ValidationReport {
        let path = path.as_ref();
        let mut report = ValidationReport::new();

        if platforms.is_empty() {
            for p in &self.default_platforms {
                report.insert(p.id(), self.validate_platform(path, p.id()));
            }
        } else {
            for name in platforms {
                report.insert(name, self.validate_platform(path, name));
            }
        }

        report
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}

fn run_single(check: &dyn PlatformCheck, path: &Path, platform: &str) -> ValidationResult {
    match platform.parse::<Platform>() {
        Ok(p) => check.check(path, p, &FsProbe),
        Err(_) => unknown_platform(platform),
    }
}

/// Check file size against a platform's limit.
pub fn validate_file_size(path: impl AsRef<Path>, platform: &str) -> ValidationResult {
    run_single(&FileSizeCheck::default(), path.as_ref(), platform)
}

/// Check image dimensions against a platform's size and aspect-ratio rules.
pub fn validate_dimensions(path: impl AsRef<Path>, platform: &str) -> ValidationResult {
    run_single(&DimensionCheck::default(), path.as_ref(), platform)
}

/// Check the decoded image format against a platform's accepted formats.
pub fn validate_format(path: impl AsRef<Path>, platform: &str) -> ValidationResult {
    run_single(&FormatCheck, path.as_ref(), platform)
}

/// Run size, dimension and format checks for each platform (default:
/// facebook and twitter).
pub fn validate_all(path: impl AsRef<Path>, platforms: &[&str]) -> ValidationReport {
    Validator::default().validate_all(path, platforms)
}

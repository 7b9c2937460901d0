//! Icon Checks - Favicons and App Icons
//!
//! Icons have no platform rule; they only need to be square, reasonably small
//! and PNG (favicons may also ship as ICO).

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use crate::probe::{FsProbe, ImageProbe};
use crate::validation::{probe_failure, ValidationResult};

const FAVICON_MAX_KB: f64 = 100.0;
const APP_ICON_MAX_KB: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    Favicon,
    AppIcon,
}

impl IconKind {
    pub fn from_filename(name: &str) -> Self {
        if name.to_lowercase().contains("favicon") {
            IconKind::Favicon
        } else {
            IconKind::AppIcon
        }
    }

    fn max_kb(self) -> f64 {
        match self {
            IconKind::Favicon => FAVICON_MAX_KB,
            IconKind::AppIcon => APP_ICON_MAX_KB,
        }
    }

    fn formats(self) -> &'static [&'static str] {
        match self {
            IconKind::Favicon => &["png", "ico"],
            IconKind::AppIcon => &["png"],
        }
    }

    fn with_article(self) -> &'static str {
        match self {
            IconKind::Favicon => "a favicon",
            IconKind::AppIcon => "an app icon",
        }
    }

    fn capitalized(self) -> &'static str {
        match self {
            IconKind::Favicon => "Favicon",
            IconKind::AppIcon => "App icon",
        }
    }
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IconKind::Favicon => "favicon",
            IconKind::AppIcon => "app icon",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IconReport {
    pub file: String,
    pub kind: IconKind,
    pub size: ValidationResult,
    pub dimensions: ValidationResult,
    pub format: ValidationResult,
}

impl IconReport {
    pub fn results(&self) -> [&ValidationResult; 3] {
        [&self.size, &self.dimensions, &self.format]
    }

    pub fn passed(&self) -> bool {
        self.results().iter().all(|r| r.passed)
    }
}

/// `WxH` embedded in a generated icon's file name, e.g. `favicon-32x32.png`.
fn size_from_filename(name: &str) -> Option<(u32, u32)> {
    static SIZE_RE: OnceLock<Regex> = OnceLock::new();
    let re = SIZE_RE.get_or_init(|| Regex::new(r"(\d+)x(\d+)").expect("valid regex"));

    let caps = re.captures(name)?;
    let w = caps[1].parse().ok()?;
    let h = caps[2].parse().ok()?;
    Some((w, h))
}

fn check_size(path: &Path, kind: IconKind, probe: &dyn ImageProbe) -> ValidationResult {
    let kb = match probe.file_len(path) {
        Ok(len) => len as f64 / 1024.0,
        Err(e) => return probe_failure(&e, "size"),
    };
    let max = kind.max_kb();

    if kb > max {
        ValidationResult::warning(format!(
            "File size {:.1}KB is large for {} (recommended <{:.0}KB)",
            kb, kind.with_article(), max
        ))
    } else {
        ValidationResult::success(format!("File size {:.1}KB is good for {}", kb, kind.with_article()))
    }
}

fn check_square(width: u32, height: u32, kind: IconKind) -> ValidationResult {
    if width == height {
        ValidationResult::success(format!(
            "Dimensions {}x{} are correct for {}",
            width, height, kind
        ))
    } else {
        ValidationResult::error(format!(
            "{} must be square, got {}x{}",
            kind.capitalized(),
            width,
            height
        ))
    }
}

fn check_dimensions(path: &Path, name: &str, kind: IconKind, probe: &dyn ImageProbe) -> ValidationResult {
    if let Some((w, h)) = size_from_filename(name) {
        return check_square(w, h, kind);
    }
    match probe.inspect(path) {
        Ok(info) => check_square(info.width, info.height, kind),
        Err(e) => probe_failure(&e, "dimensions"),
    }
}

fn check_format(path: &Path, kind: IconKind, probe: &dyn ImageProbe) -> ValidationResult {
    let format = match probe.inspect(path) {
        Ok(info) => info.format.to_lowercase(),
        Err(e) => return probe_failure(&e, "format"),
    };

    if kind.formats().contains(&format.as_str()) {
        ValidationResult::success(format!("Format {} is correct", format.to_uppercase()))
    } else {
        ValidationResult::error(format!(
            "Format {} is not suitable for {} (use {})",
            format.to_uppercase(),
            kind.with_article(),
            kind.formats().join(", ").to_uppercase()
        ))
    }
}

pub fn validate_icon_with(path: &Path, probe: &dyn ImageProbe) -> IconReport {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = IconKind::from_filename(&name);

    IconReport {
        file: name.clone(),
        kind,
        size: check_size(path, kind, probe),
        dimensions: check_dimensions(path, &name, kind, probe),
        format: check_format(path, kind, probe),
    }
}

/// Check a generated favicon or app icon on disk.
pub fn validate_icon(path: impl AsRef<Path>) -> IconReport {
    validate_icon_with(path.as_ref(), &FsProbe)
}

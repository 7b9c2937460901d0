//! Contract Invariant Tests
//!
//! These run the engine against real files on disk.

use std::fs::File;
use std::path::{Path, PathBuf};

use assetcheck_core::{
    calculate_contrast_ratio, hex_to_rgb, summarize, validate_all, validate_contrast,
    validate_dimensions, validate_file_size, validate_format, validate_icon, Platform, Rgb,
    ValidationLevel, Validator, ValidatorConfig,
};
use tempfile::TempDir;

fn png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.path().join(name);
    image::RgbImage::new(width, height).save(&path).unwrap();
    path
}

fn sized_file(dir: &Path, name: &str, len: u64) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().set_len(len).unwrap();
    path
}

#[test]
fn invariant_size_equal_to_limit_passes() {
    let dir = tempfile::tempdir().unwrap();
    for p in Platform::ALL {
        let max = p.rule().max_file_size;
        let at = sized_file(dir.path(), &format!("{}-at.png", p.id()), max);
        let over = sized_file(dir.path(), &format!("{}-over.png", p.id()), max + 1);

        let result = validate_file_size(&at, p.id());
        assert!(result.passed, "{} at limit", p.id());
        assert_eq!(result.level, ValidationLevel::Warning);

        let result = validate_file_size(&over, p.id());
        assert!(!result.passed, "{} over limit", p.id());
        assert_eq!(result.level, ValidationLevel::Error);
    }
}

#[test]
fn invariant_recommended_size_matches() {
    let dir = tempfile::tempdir().unwrap();
    let path = png(&dir, "og-image.png", 1200, 630);

    let result = validate_dimensions(&path, "facebook");
    assert!(result.passed);
    assert_eq!(result.level, ValidationLevel::Success);
    assert!(result.message.contains("match"));

    let report = validate_all(&path, &["facebook"]);
    let summary = summarize(&report);
    assert_eq!((summary.total, summary.passed), (3, 3));
}

#[test]
fn invariant_below_minimum_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = png(&dir, "small.png", 600, 300);

    let result = validate_dimensions(&path, "facebook");
    assert!(!result.passed);
    assert_eq!(result.level, ValidationLevel::Error);
}

#[test]
fn invariant_missing_file_every_check_errors() {
    let report = validate_all("missing.png", &["facebook"]);
    let checks = report.get("facebook").unwrap();

    assert_eq!(checks.len(), 3);
    for check in checks {
        assert!(!check.passed);
        assert_eq!(check.level, ValidationLevel::Error);
        assert!(check.message.starts_with("File not found"), "{}", check.message);
    }
}

#[test]
fn invariant_unknown_platform_never_panics() {
    let dir = tempfile::tempdir().unwrap();
    let path = png(&dir, "og.png", 1200, 630);

    for result in [
        validate_file_size(&path, "friendster"),
        validate_dimensions(&path, "friendster"),
        validate_format(&path, "friendster"),
    ] {
        assert!(!result.passed);
        assert_eq!(result.level, ValidationLevel::Error);
        assert_eq!(result.message, "Unknown platform: friendster");
    }

    let report = validate_all(&path, &["friendster", "twitter"]);
    assert_eq!(report.platforms(), vec!["friendster", "twitter"]);
    assert_eq!(report.get("friendster").unwrap().len(), 1);
    assert_eq!(report.get("twitter").unwrap().len(), 3);
}

#[test]
fn invariant_default_platforms() {
    let dir = tempfile::tempdir().unwrap();
    let path = png(&dir, "og.png", 1200, 630);
    let report = validate_all(&path, &[]);
    assert_eq!(report.platforms(), vec!["facebook", "twitter"]);
}

#[test]
fn invariant_format_checks_decoded_format() {
    let dir = tempfile::tempdir().unwrap();

    let jpg = dir.path().join("og-twitter.jpg");
    image::RgbImage::new(1200, 675).save(&jpg).unwrap();
    let result = validate_format(&jpg, "twitter");
    assert!(result.passed);
    assert_eq!(result.message, "Format JPG is supported by Twitter");

    let gif = dir.path().join("og.gif");
    image::RgbaImage::new(1200, 630).save(&gif).unwrap();
    let result = validate_format(&gif, "facebook");
    assert!(!result.passed);
    assert_eq!(
        result.message,
        "Format GIF not supported by Facebook (use PNG, JPG, JPEG)"
    );
}

#[test]
fn invariant_unreadable_image_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let report = validate_all(&path, &["facebook"]);
    let checks = report.get("facebook").unwrap();
    assert!(checks[0].passed);
    assert!(!checks[1].passed);
    assert!(checks[1].message.starts_with("Could not read image dimensions:"));
    assert!(!checks[2].passed);
    assert!(checks[2].message.starts_with("Could not read image format:"));
}

#[test]
fn invariant_config_file_drives_validator() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("assetcheck.json");
    std::fs::write(
        &config_path,
        r#"{"defaultPlatforms": ["linkedin"], "checks": {"fileSize": false}}"#,
    )
    .unwrap();

    let config = ValidatorConfig::load(&config_path).unwrap();
    let path = png(&dir, "og.png", 1200, 627);
    let report = Validator::new(&config).validate_all(&path, &[]);

    assert_eq!(report.platforms(), vec!["linkedin"]);
    let checks = report.get("linkedin").unwrap();
    assert_eq!(checks.len(), 2);
    assert!(checks.iter().all(|c| c.passed));
}

#[test]
fn invariant_contrast_properties() {
    let purple = hex_to_rgb("#4F46E5").unwrap();
    assert_eq!(purple, Rgb(79, 70, 229));

    assert_eq!(calculate_contrast_ratio(purple, purple), 1.0);
    assert_eq!(
        calculate_contrast_ratio(purple, Rgb::WHITE),
        calculate_contrast_ratio(Rgb::WHITE, purple)
    );
    assert!((calculate_contrast_ratio(Rgb::BLACK, Rgb::WHITE) - 21.0).abs() < 1e-9);

    // 80px bold is large text, so AAA drops to 4.5.
    let result = validate_contrast(Rgb::WHITE, purple, 80, true);
    assert!(result.passed);
    assert!(result.message.contains("AAA standards (4.5:1 required)"));
}

#[test]
fn invariant_icon_checks_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let favicon = png(&dir, "favicon-32x32.png", 32, 32);
    let report = validate_icon(&favicon);
    assert!(report.passed());

    let touch = png(&dir, "apple-touch-icon.png", 180, 160);
    let report = validate_icon(&touch);
    assert!(!report.dimensions.passed);
    assert!(report.size.passed);
    assert!(report.format.passed);
}

#[test]
fn invariant_ico_accepted_only_for_favicons() {
    let dir = tempfile::tempdir().unwrap();

    let favicon = dir.path().join("favicon.ico");
    image::RgbaImage::new(32, 32).save(&favicon).unwrap();
    let report = validate_icon(&favicon);
    assert!(report.format.passed, "{}", report.format.message);
    assert!(report.passed());

    let app = dir.path().join("icon-48x48.ico");
    image::RgbaImage::new(48, 48).save(&app).unwrap();
    let report = validate_icon(&app);
    assert!(!report.format.passed);
    assert_eq!(
        report.format.message,
        "Format ICO is not suitable for an app icon (use PNG)"
    );
}

#[test]
fn invariant_config_rejects_empty_selection() {
    let dir = tempfile::tempdir().unwrap();
    for (name, body) in [
        ("no-platforms.json", r#"{"defaultPlatforms": []}"#),
        (
            "no-checks.json",
            r#"{"checks": {"fileSize": false, "dimensions": false, "format": false}}"#,
        ),
    ] {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        let err = ValidatorConfig::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config:"), "{}", err);
    }
}

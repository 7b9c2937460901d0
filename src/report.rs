//! Validation Reports - Per-Platform Aggregation

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::validation::ValidationResult;
use crate::ENGINE_VERSION;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlatformReport {
    pub platform: String,
    pub checks: Vec<ValidationResult>,
}

/// Platform name to ordered checks, in the order platforms were requested.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ValidationReport {
    entries: Vec<PlatformReport>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert checks for a platform. A repeated name replaces the earlier
    /// checks but keeps its original position.
    pub fn insert(&mut self, platform: &str, checks: Vec<ValidationResult>) {
        match self.entries.iter_mut().find(|e| e.platform == platform) {
            Some(entry) => entry.checks = checks,
            None => self.entries.push(PlatformReport {
                platform: platform.to_string(),
                checks,
            }),
        }
    }

    pub fn get(&self, platform: &str) -> Option<&[ValidationResult]> {
        self.entries
            .iter()
            .find(|e| e.platform == platform)
            .map(|e| e.checks.as_slice())
    }

    pub fn platforms(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.platform.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformReport> {
        self.entries.iter()
    }

    pub fn summarize(&self) -> Summary {
        summarize(self)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Summary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Count checks across every platform in the report.
pub fn summarize(report: &ValidationReport) -> Summary {
    let (total, passed) = report
        .iter()
        .flat_map(|e| e.checks.iter())
        .fold((0, 0), |(total, passed), r| {
            (total + 1, passed + usize::from(r.passed))
        });

    Summary {
        total,
        passed,
        failed: total - passed,
    }
}

/// Envelope for machine-readable output of one file's validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationRun {
    pub file: String,
    pub engine_version: String,
    pub generated_at: DateTime<Utc>,
    pub report: ValidationReport,
    pub summary: Summary,
}

impl ValidationRun {
    pub fn new(file: impl Into<String>, report: ValidationReport) -> Self {
        let summary = report.summarize();
        Self {
            file: file.into(),
            engine_version: ENGINE_VERSION.to_string(),
            generated_at: Utc::now(),
            report,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationReport {
        let mut report = ValidationReport::new();
        report.insert(
            "facebook",
            vec![
                ValidationResult::success("File size 0.1MB is within Facebook limits"),
                ValidationResult::warning("Dimensions 1000x1000 have non-standard aspect ratio"),
                ValidationResult::error("Format GIF not supported by Facebook"),
            ],
        );
        report.insert("myspace", vec![ValidationResult::error("Unknown platform: myspace")]);
        report
    }

    #[test]
    fn test_summarize_counts() {
        let summary = summarize(&sample());
        assert_eq!(summary, Summary { total: 4, passed: 2, failed: 2 });
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_empty_report_all_passed() {
        let summary = ValidationReport::new().summarize();
        assert_eq!(summary.total, 0);
        assert!(summary.all_passed());
    }

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut report = sample();
        report.insert("twitter", vec![]);
        report.insert("facebook", vec![ValidationResult::success("ok")]);
        assert_eq!(report.platforms(), vec!["facebook", "myspace", "twitter"]);
        assert_eq!(report.get("facebook").unwrap().len(), 1);
        assert!(report.get("linkedin").is_none());
    }

    #[test]
    fn test_run_serializes() {
        let run = ValidationRun::new("og.png", sample());
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["file"], "og.png");
        assert_eq!(json["summary"]["failed"], 2);
        assert_eq!(json["report"][0]["platform"], "facebook");
        assert_eq!(json["report"][0]["checks"][1]["level"], "warning");
    }
}

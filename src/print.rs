//! Presentation - Text Rendering of Results
//!
//! Kept apart from the result types so headless callers never go through it.

use std::fmt;
use std::io::{self, Write};

use crate::platforms::Platform;
use crate::report::{summarize, ValidationReport};
use crate::validation::{ValidationLevel, ValidationResult};

const RULE_WIDTH: usize = 70;

impl ValidationLevel {
    pub fn glyph(self) -> &'static str {
        match self {
            ValidationLevel::Success => "✓",
            ValidationLevel::Warning => "⚠",
            ValidationLevel::Error => "❌",
            ValidationLevel::Info => "ℹ",
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.glyph(), self.message)
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn heading(platform: &str) -> String {
    platform
        .parse::<Platform>()
        .map(|p| p.to_string())
        .unwrap_or_else(|_| title_case(platform))
}

/// Render a report as text. When `verbose` is false only warnings and
/// errors are listed; the summary always counts every check.
pub fn render_validation_results(report: &ValidationReport, verbose: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    for entry in report.iter() {
        out.push_str(&format!("\n{} Validation:\n{}\n", heading(&entry.platform), rule));
        for result in entry.checks.iter().filter(|r| verbose || r.is_problem()) {
            out.push_str(&format!("  {}\n", result));
        }
    }

    let summary = summarize(report);
    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!(
        "Summary: {}/{} checks passed\n",
        summary.passed, summary.total
    ));

    if summary.failed > 0 {
        out.push_str(&format!("⚠ {} issue(s) need attention\n", summary.failed));
    } else {
        out.push_str("✓ All validations passed!\n");
    }

    out
}

pub fn write_validation_results(
    w: &mut impl Write,
    report: &ValidationReport,
    verbose: bool,
) -> io::Result<()> {
    w.write_all(render_validation_results(report, verbose).as_bytes())
}

/// Print a report to stdout.
pub fn print_validation_results(report: &ValidationReport, verbose: bool) -> io::Result<()> {
    write_validation_results(&mut io::stdout().lock(), report, verbose)
}

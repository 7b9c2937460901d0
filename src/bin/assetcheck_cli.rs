//! AssetCheck CLI - validate generated web assets
//!
//! Commands: platforms, validate, contrast, icon
//! Text to stdout by default, JSON with --json
//! Returns 2 when a check fails, 1 on usage or config errors

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use assetcheck_core::{
    contrast::{calculate_contrast_ratio, thresholds},
    parse_color, platforms_for_filename, render_validation_results, validate_contrast,
    validate_icon, Platform, ValidationRun, Validator, ValidatorConfig,
};

#[derive(Parser)]
#[command(name = "assetcheck-cli", version)]
#[command(about = "AssetCheck CLI - social image, icon and contrast validation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON validator config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List platform rules
    Platforms,

    /// Validate an image against platform rules
    Validate {
        /// Image file
        file: PathBuf,

        /// Platform to check (repeatable); defaults come from config
        #[arg(short, long = "platform")]
        platforms: Vec<String>,

        /// Pick platforms from the file name
        #[arg(long, conflicts_with = "platforms")]
        auto: bool,

        /// Only show warnings and errors
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check WCAG contrast between text and background colors
    Contrast {
        /// Text color (#RRGGBB, white, black)
        #[arg(long)]
        text: String,

        /// Background color (#RRGGBB, white, black)
        #[arg(long)]
        background: String,

        /// Font size in pixels
        #[arg(long, default_value_t = 16)]
        font_size: u32,

        /// Text is bold
        #[arg(long)]
        bold: bool,
    },

    /// Validate favicons and app icons
    Icon {
        /// Icon files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(json: bool, message: &str) -> ExitCode {
    if json {
        println!("{}", serde_json::json!({ "error": message }));
    } else {
        eprintln!("error: {}", message);
    }
    ExitCode::FAILURE
}

fn emit_json(value: &impl serde::Serialize) -> Result<(), ExitCode> {
    let s = serde_json::to_string_pretty(value)
        .map_err(|e| fail(true, &format!("Serialization error: {}", e)))?;
    println!("{}", s);
    Ok(())
}

fn verdict(passed: bool, emitted: Result<(), ExitCode>) -> ExitCode {
    match emitted {
        Err(code) => code,
        Ok(()) if passed => ExitCode::SUCCESS,
        Ok(()) => ExitCode::from(2), // Validation failure
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match ValidatorConfig::load(path) {
            Ok(c) => c,
            Err(e) => return fail(cli.json, &e.to_string()),
        },
        None => ValidatorConfig::default(),
    };

    match cli.command {
        Commands::Platforms => {
            if cli.json {
                let rules: Vec<_> = Platform::ALL
                    .iter()
                    .map(|p| serde_json::json!({ "platform": p, "rule": p.rule() }))
                    .collect();
                return verdict(true, emit_json(&rules));
            }
            for p in Platform::ALL {
                let rule = p.rule();
                println!(
                    "{:<10} max {}MB  recommended {}x{}  min {}x{}  ratio {:.2}  formats {}",
                    p.id(),
                    rule.max_file_size / (1024 * 1024),
                    rule.recommended_size.0,
                    rule.recommended_size.1,
                    rule.min_size.0,
                    rule.min_size.1,
                    rule.aspect_ratio,
                    rule.formats.join(", ")
                );
            }
            ExitCode::SUCCESS
        }

        Commands::Validate { file, platforms, auto, quiet } => {
            let names: Vec<String> = if auto {
                platforms_for_filename(&file_name(&file))
                    .into_iter()
                    .map(|p| p.id().to_string())
                    .collect()
            } else {
                platforms
            };
            let names: Vec<&str> = names.iter().map(String::as_str).collect();

            info!(file = %file.display(), platforms = ?names, "validating");
            let report = Validator::new(&config).validate_all(&file, &names);
            let run = ValidationRun::new(file.display().to_string(), report);

            let emitted = if cli.json {
                emit_json(&run)
            } else {
                println!("Validating: {}", run.file);
                print!("{}", render_validation_results(&run.report, !quiet));
                Ok(())
            };
            verdict(run.summary.all_passed(), emitted)
        }

        Commands::Contrast { text, background, font_size, bold } => {
            let (text_rgb, bg_rgb) = match (parse_color(&text), parse_color(&background)) {
                (Ok(t), Ok(b)) => (t, b),
                (Err(e), _) | (_, Err(e)) => return fail(cli.json, &e.to_string()),
            };

            let result = validate_contrast(text_rgb, bg_rgb, font_size, bold);
            let passed = result.passed;
            let emitted = if cli.json {
                emit_json(&serde_json::json!({
                    "text": text_rgb.to_string(),
                    "background": bg_rgb.to_string(),
                    "ratio": calculate_contrast_ratio(text_rgb, bg_rgb),
                    "thresholds": thresholds(font_size, bold),
                    "result": result,
                }))
            } else {
                println!("{}", result);
                Ok(())
            };
            verdict(passed, emitted)
        }

        Commands::Icon { files } => {
            let reports: Vec<_> = files.iter().map(validate_icon).collect();
            let passed = reports.iter().all(|r| r.passed());

            let emitted = if cli.json {
                emit_json(&reports)
            } else {
                for report in &reports {
                    println!("\n{}:", report.file);
                    for result in report.results() {
                        println!("  {}", result);
                    }
                }
                Ok(())
            };
            verdict(passed, emitted)
        }
    }
}

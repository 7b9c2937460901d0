//! AssetCheck Core - Web Asset Validation Engine
//!
//! Checks generated social-preview images, favicons and app icons against
//! platform rules, and text/background colors against WCAG contrast levels.
//!
//! Every check is total: problems come back as error-level
//! `ValidationResult`s, never as panics or `Err`, so batch runs over many
//! files and platforms always finish.

pub mod config;
pub mod contrast;
pub mod icons;
pub mod platforms;
pub mod print;
pub mod probe;
pub mod report;
pub mod validation;

pub use config::{ConfigError, ValidatorConfig};
pub use contrast::{calculate_contrast_ratio, hex_to_rgb, parse_color, validate_contrast, ColorError, Rgb};
pub use icons::{validate_icon, IconKind, IconReport};
pub use platforms::{lookup, platforms_for_filename, Platform, PlatformError, PlatformRule};
pub use print::{print_validation_results, render_validation_results};
pub use probe::{FsProbe, ImageInfo, ImageProbe, ProbeError};
pub use report::{summarize, Summary, ValidationReport, ValidationRun};
pub use validation::{
    validate_all, validate_dimensions, validate_file_size, validate_format, ValidationLevel,
    ValidationResult, Validator,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

//! Configuration for decoding and for the command-line tool.
//!
//! [`ParseOptions`] controls how decoded values are rendered and is all the
//! library needs. [`Config`] is the CLI surface of the `exif-inspector`
//! binary and supports:
//! - Command-line arguments via clap
//! - Environment variables with `EXIF_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! - `EXIF_FORMAT` - Output format, `text` or `json` (default: text)
//! - `EXIF_KEEP_EMPTY` - Keep tags whose value is empty (default: false)
//! - `EXIF_DECIMALS` - Decimal places for rational values (default: 4)

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// =============================================================================
// Default Values
// =============================================================================

/// Default number of decimal places rationals are rounded to.
pub const DEFAULT_DECIMAL_PLACES: u8 = 4;

/// Largest accepted number of decimal places.
pub const MAX_DECIMAL_PLACES: u8 = 10;

// =============================================================================
// Parse Options
// =============================================================================

/// Options controlling how decoded values become display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep tags whose rendered value is the empty string.
    ///
    /// Off by default: an empty value usually means padding rather than an
    /// intentionally blank field.
    pub keep_empty_values: bool,

    /// Decimal places rational values are rounded to before rendering.
    pub decimal_places: u8,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            keep_empty_values: false,
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

impl ParseOptions {
    /// Validate the options and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(format!(
                "decimal_places must be between 0 and {}",
                MAX_DECIMAL_PLACES
            ));
        }
        Ok(())
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Output format for the decoded tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `label: value` line per tag
    #[default]
    Text,
    /// A single JSON object, keys in file order
    Json,
}

/// exif-inspector - Print the EXIF tags of a JPEG file.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-inspector")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JPEG file to inspect.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_FORMAT")]
    pub format: OutputFormat,

    /// Keep tags whose value is empty.
    #[arg(long, default_value_t = false, env = "EXIF_KEEP_EMPTY")]
    pub keep_empty: bool,

    /// Decimal places for rational values (0-10).
    #[arg(long, default_value_t = DEFAULT_DECIMAL_PLACES, env = "EXIF_DECIMALS")]
    pub decimals: u8,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Decoder options derived from the command line.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            keep_empty_values: self.keep_empty,
            decimal_places: self.decimals,
        }
    }

    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.file.as_os_str().is_empty() {
            return Err("An input file is required".to_string());
        }
        self.parse_options().validate()
    }
}

// =============================================================================
// Tests
// =============================================================================

//! exif-inspector - Print the EXIF tags of a JPEG file.
//!
//! This binary loads the file, hands the bytes to the decoder, and renders
//! the resulting tags as text or JSON.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_inspector::{parse_exif_with, Config, ExifError, OutputFormat, TagMap};

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let bytes = match std::fs::read(&config.file) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read {}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(path = %config.file.display(), size = bytes.len(), "loaded file");

    let tags = match parse_exif_with(bytes, &config.parse_options()) {
        Ok(tags) => tags,
        Err(e @ ExifError::NotFound(_)) => {
            error!("{}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            error!("{} is not a readable JPEG: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match render(&tags, config.format) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to render output: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Render the tags in the requested format.
fn render(tags: &TagMap, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(tags),
        OutputFormat::Text => Ok(tags
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never mix with the rendered tags on stdout.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_inspector=debug"
    } else {
        "exif_inspector=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

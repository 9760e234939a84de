//! Command-line interface.

pub mod commands;
pub mod display;
pub mod output;
pub mod types;

use anyhow::{Context, Result};

pub use output::{handle_error, output, CommandOutput};
pub use types::{Cli, Commands};

use crate::domain::errors::ConfigResult;
use crate::domain::models::document::{ConfigDocument, DEFAULT_SECTION};
use crate::domain::models::settings::LoggingSettings;
use crate::infrastructure::logging::{LogConfig, LogFormat, LoggerImpl};

/// Logging configuration from `configdir` and the `[Logging]` section.
///
/// Only those keys are read, so a problem elsewhere in the document does not
/// block logging. A missing or invalid `[Logging]` key is an error.
pub fn log_config(
    doc: &ConfigDocument,
    log_to_file: bool,
    format: LogFormat,
) -> ConfigResult<LogConfig> {
    let configdir = doc.get_path(DEFAULT_SECTION, "configdir")?;
    let settings = LoggingSettings::from_document(doc, &configdir)?;
    let config = if log_to_file {
        LogConfig::with_file(&settings)
    } else {
        LogConfig::console_only(&settings)
    };
    Ok(config.with_format(format))
}

/// Install the global subscriber described by [`log_config`].
pub fn init_logging(doc: &ConfigDocument, log_to_file: bool, format: LogFormat) -> Result<LoggerImpl> {
    let config = log_config(doc, log_to_file, format).context("Invalid logging configuration")?;
    LoggerImpl::init(&config)
}

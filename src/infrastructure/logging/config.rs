//! Logging configuration built from the `[Logging]` section.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::Level;

use crate::domain::models::log_level::LogLevel;
use crate::domain::models::settings::LoggingSettings;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Console verbosity
    pub console_level: LogLevel,

    /// File verbosity
    pub file_level: LogLevel,

    /// Console output format (json, pretty)
    pub format: LogFormat,

    /// Log file (optional, if None logs only to the console)
    pub log_file: Option<PathBuf>,
}

/// Console output format; file output is always JSON
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Human-readable multi-line output
    #[default]
    Pretty,
}

/// Returned when a token is neither `pretty` nor `json`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid log format: {0}. Must be one of: pretty, json")]
pub struct ParseLogFormatError(pub String);

impl LogFormat {
    /// Lower-case token used on the command line and in the environment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ParseLogFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(ParseLogFormatError(other.to_string())),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_level: LogLevel::Info,
            file_level: LogLevel::Debug,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Console-only configuration at the `[Logging]` console level
    pub fn console_only(settings: &LoggingSettings) -> Self {
        Self {
            console_level: settings.console,
            file_level: settings.file,
            ..Self::default()
        }
    }

    /// Console plus file output, both levels taken from `[Logging]`
    pub fn with_file(settings: &LoggingSettings) -> Self {
        Self {
            log_file: Some(settings.logfile.clone()),
            ..Self::console_only(settings)
        }
    }

    /// Same configuration with the given console format
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        Self::from_level(level.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LoggingSettings {
        LoggingSettings {
            logfile: PathBuf::from("/tmp/app.log"),
            console: LogLevel::Warn,
            file: LogLevel::Debug,
        }
    }

    #[test]
    fn test_level_conversion() {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
    }

    #[test]
    fn test_from_settings() {
        let console = LogConfig::console_only(&settings());
        assert_eq!(console.console_level, LogLevel::Warn);
        assert!(console.log_file.is_none());
        assert_eq!(console.format, LogFormat::Pretty);

        let file = LogConfig::with_file(&settings()).with_format(LogFormat::Json);
        assert_eq!(file.file_level, LogLevel::Debug);
        assert_eq!(file.log_file, Some(PathBuf::from("/tmp/app.log")));
        assert_eq!(file.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!(
            "compact".parse::<LogFormat>().unwrap_err(),
            ParseLogFormatError("compact".to_string())
        );
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(serde_json::to_value(LogFormat::Pretty).unwrap(), "pretty");
    }
}

//! Log verbosity accepted by the `[Logging]` section.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verbosity accepted by the `loglevel_*` keys of the `[Logging]` section.
///
/// Ordered from least to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Everything, including debug output
    Debug,
}

/// Returned when a token is not one of the four log levels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid log level: {0}. Must be one of: ERROR, WARN, INFO, DEBUG")]
pub struct ParseLogLevelError(pub String);

impl LogLevel {
    /// All levels, least verbose first.
    pub const ALL: [Self; 4] = [Self::Error, Self::Warn, Self::Info, Self::Debug];

    /// Canonical upper-case token as written in configuration files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseLogLevelError(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_levels() {
        assert_eq!("ERROR".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        assert_eq!(" debug ".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("Info".parse::<LogLevel>(), Ok(LogLevel::Info));
    }

    #[test]
    fn test_parse_rejects_other_tokens() {
        assert_eq!(
            "VERBOSE".parse::<LogLevel>(),
            Err(ParseLogLevelError("VERBOSE".to_string()))
        );
        // python-style spelling is not part of the closed set
        assert!("WARNING".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_ordering_is_by_verbosity() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn test_display_round_trips() {
        for level in LogLevel::ALL {
            assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        }
    }
}

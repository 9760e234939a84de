//! Domain errors for configuration loading and lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a configuration document or reading from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed input: a bad line, a duplicate, bad `%` syntax or a circular reference.
    #[error("{origin}:{line}: {message}")]
    Parse {
        origin: String,
        line: usize,
        message: String,
    },

    #[error("No section: [{0}]")]
    NoSection(String),

    #[error("Key '{key}' not found in section [{section}] or [DEFAULT]")]
    KeyNotFound { section: String, key: String },

    #[error("Key '{key}' in section [{section}] references '%({reference})s', which is not defined")]
    UnresolvedInterpolation {
        section: String,
        key: String,
        reference: String,
    },

    #[error(
        "Invalid value '{value}' for key '{key}' in section [{section}]. Must be one of: ERROR, WARN, INFO, DEBUG"
    )]
    InvalidEnumValue {
        section: String,
        key: String,
        value: String,
    },

    #[error("Cannot expand '~': home directory could not be determined")]
    HomeDirUnavailable,

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Shorthand for a parse error at a given origin and line.
    pub fn parse(origin: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            origin: origin.into(),
            line,
            message: message.into(),
        }
    }

    /// True when the error means "this key is simply absent".
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. } | Self::NoSection(_))
    }
}

/// Result alias used throughout the loader.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_names_origin_and_line() {
        let err = ConfigError::parse("app.cfg", 7, "expected 'key = value'");
        assert_eq!(err.to_string(), "app.cfg:7: expected 'key = value'");
    }

    #[test]
    fn test_is_missing() {
        assert!(ConfigError::NoSection("Tools".to_string()).is_missing());
        assert!(ConfigError::KeyNotFound {
            section: "Logging".to_string(),
            key: "tools".to_string(),
        }
        .is_missing());
        assert!(!ConfigError::HomeDirUnavailable.is_missing());
    }
}

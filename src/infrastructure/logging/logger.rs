//! Global subscriber installation.
//!
//! The console always receives events on stderr; a JSON file layer is added
//! when the configuration names a log file.

use super::config::{LogConfig, LogFormat};
use crate::domain::models::log_level::LogLevel;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logger implementation using tracing
#[derive(Debug)]
pub struct LoggerImpl {
    _guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Initialize the logger with the given configuration
    ///
    /// Console and file outputs are filtered independently by their own
    /// level. `RUST_LOG` directives are applied on top of both.
    ///
    /// # Returns
    /// * `Result<Self>` - Logger instance with guard to keep the file writer alive
    ///
    /// # Errors
    /// Returns an error if the log directory cannot be created or a global
    /// subscriber is already installed
    pub fn init(config: &LogConfig) -> Result<Self> {
        let mut layers: Vec<BoxedLayer> = Vec::new();

        let guard = if let Some(ref log_file) = config.log_file {
            let (log_dir, file_name) = split_log_path(log_file)?;
            fs::create_dir_all(&log_dir)
                .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

            let file_appender = rolling::never(&log_dir, file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            // File layer - always JSON for structured logging
            layers.push(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_ansi(false)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(level_filter(config.file_level))
                    .boxed(),
            );

            Some(guard)
        } else {
            None
        };

        let console_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(level_filter(config.console_level))
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(level_filter(config.console_level))
                .boxed(),
        };
        layers.push(console_layer);

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .context("Failed to install global tracing subscriber")?;

        tracing::debug!(
            console_level = %config.console_level,
            file_level = %config.file_level,
            format = ?config.format,
            log_file = ?config.log_file,
            "logger initialized"
        );

        Ok(Self { _guard: guard })
    }

    /// Whether a file writer is attached
    pub const fn has_file_output(&self) -> bool {
        self._guard.is_some()
    }
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy()
}

/// Split a log file path into the directory and file name the appender wants
fn split_log_path(path: &Path) -> Result<(PathBuf, &str)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("Log file path has no usable file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((dir, file_name))
}

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, trace, warn};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/app.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, "app.log");

        let (dir, name) = split_log_path(Path::new("app.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "app.log");

        assert!(split_log_path(Path::new("/")).is_err());
    }

    // Subscriber installation is covered by tests/logging_integration_test.rs,
    // which runs in its own process.
}

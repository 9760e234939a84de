//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Console output filtered by `loglevel_console`
//! - JSON file output filtered by `loglevel_file`
pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, ParseLogFormatError};
pub use logger::{debug, error, info, instrument, trace, warn, LoggerImpl};

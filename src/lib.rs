//! wrapconf - configuration loader for a scientific tool wrapper
//!
//! Loads a sectioned key/value file with an inherited `DEFAULT` section and
//! `%(name)s` interpolation, and exposes typed accessors for paths, lists and
//! log levels.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): the document model, interpolation and typed views
//! - **Infrastructure Layer** (`infrastructure`): parsing, loading, merging, setup and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use wrapconf::{ConfigLoader, LogLevel};
//!
//! let doc = ConfigLoader::parse_str(
//!     "[DEFAULT]\nconfigdir = /home/u\nqscriptdir = %(configdir)s/qscripts\n\n\
//!      [Logging]\nloglevel_console = DEBUG\n",
//!     "example.cfg",
//! )?;
//!
//! assert_eq!(doc.get("DEFAULT", "qscriptdir")?, "/home/u/qscripts");
//! assert_eq!(doc.get("Logging", "configdir")?, "/home/u");
//! assert_eq!(doc.get_log_level("Logging", "loglevel_console")?, LogLevel::Debug);
//! # Ok::<(), wrapconf::ConfigError>(())
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{
    ConfigDocument, Directories, LogLevel, LoggingSettings, MergePolicy, Section, Settings,
    ToolFamily, DEFAULT_SECTION, LOGGING_SECTION, TOOL_FAMILY_SECTION,
};
pub use domain::{ConfigError, ConfigResult};
pub use infrastructure::config::{ConfigLoader, RuntimeOptions};

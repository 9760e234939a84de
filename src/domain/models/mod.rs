//! Domain models: the configuration document and the typed views built on it.

pub mod document;
pub mod log_level;
pub mod settings;

pub use document::{
    expand_tilde, normalize_key, ConfigDocument, Entry, Location, MergePolicy,
    ParseMergePolicyError, Section, DEFAULT_SECTION,
};
pub use log_level::{LogLevel, ParseLogLevelError};
pub use settings::{
    Directories, LoggingSettings, Settings, ToolFamily, LOGGING_SECTION, TOOL_FAMILY_SECTION,
};

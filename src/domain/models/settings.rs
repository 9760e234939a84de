//! Typed views over the sections the wrapper understands.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::document::{ConfigDocument, DEFAULT_SECTION};
use super::log_level::LogLevel;
use crate::domain::errors::ConfigResult;

/// Section listing the wrapped tool family.
pub const TOOL_FAMILY_SECTION: &str = "ToolFamily";

/// Section controlling log output.
pub const LOGGING_SECTION: &str = "Logging";

/// `Ok(None)` for an absent key or section, the value otherwise.
fn optional<T>(result: ConfigResult<T>) -> ConfigResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_missing() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Directory locations from the DEFAULT section, with `~` expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directories {
    /// Base user configuration directory
    pub configdir: PathBuf,
    /// Queuing-script directory
    pub qscriptdir: PathBuf,
    /// Template-file directory
    pub templatesdir: PathBuf,
}

impl Directories {
    /// Read the three directory keys from DEFAULT.
    pub fn from_document(doc: &ConfigDocument) -> ConfigResult<Self> {
        Ok(Self {
            configdir: doc.get_path(DEFAULT_SECTION, "configdir")?,
            qscriptdir: doc.get_path(DEFAULT_SECTION, "qscriptdir")?,
            templatesdir: doc.get_path(DEFAULT_SECTION, "templatesdir")?,
        })
    }

    /// `(key, path)` pairs, base directory first.
    pub fn all(&self) -> [(&'static str, &Path); 3] {
        [
            ("configdir", self.configdir.as_path()),
            ("qscriptdir", self.qscriptdir.as_path()),
            ("templatesdir", self.templatesdir.as_path()),
        ]
    }
}

/// The optional `[ToolFamily]` keys. Absent keys read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolFamily {
    /// Version string; `None` when unset or empty
    pub release: Option<String>,
    /// Tool identifiers
    pub tools: Vec<String>,
    /// Exposed group names
    pub groups: Vec<String>,
}

impl ToolFamily {
    /// Read `[ToolFamily]`; a missing section yields the empty view.
    pub fn from_document(doc: &ConfigDocument) -> ConfigResult<Self> {
        let release = optional(doc.get(TOOL_FAMILY_SECTION, "release"))?
            .map(|release| release.trim().to_string())
            .filter(|release| !release.is_empty());

        Ok(Self {
            release,
            tools: optional(doc.get_list(TOOL_FAMILY_SECTION, "tools"))?.unwrap_or_default(),
            groups: optional(doc.get_list(TOOL_FAMILY_SECTION, "groups"))?.unwrap_or_default(),
        })
    }
}

/// The `[Logging]` keys, parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingSettings {
    /// Log file; a relative `logfilename` is placed under `configdir`
    pub logfile: PathBuf,
    /// Console verbosity
    pub console: LogLevel,
    /// File verbosity
    pub file: LogLevel,
}

impl LoggingSettings {
    /// Read `[Logging]`. All three keys are required.
    pub fn from_document(doc: &ConfigDocument, configdir: &Path) -> ConfigResult<Self> {
        let logfile = doc.get_path(LOGGING_SECTION, "logfilename")?;
        let logfile = if logfile.is_relative() {
            configdir.join(logfile)
        } else {
            logfile
        };

        Ok(Self {
            logfile,
            console: doc.get_log_level(LOGGING_SECTION, "loglevel_console")?,
            file: doc.get_log_level(LOGGING_SECTION, "loglevel_file")?,
        })
    }
}

/// Everything the wrapper reads from its configuration, in typed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// DEFAULT directories
    pub directories: Directories,
    /// `[ToolFamily]`
    pub tool_family: ToolFamily,
    /// `[Logging]`
    pub logging: LoggingSettings,
}

impl Settings {
    /// Build all typed views from one document.
    pub fn from_document(doc: &ConfigDocument) -> ConfigResult<Self> {
        let directories = Directories::from_document(doc)?;
        let logging = LoggingSettings::from_document(doc, &directories.configdir)?;
        Ok(Self {
            tool_family: ToolFamily::from_document(doc)?,
            directories,
            logging,
        })
    }
}

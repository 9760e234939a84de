//! The configuration document: DEFAULT plus named sections of raw entries.
//!
//! Values are stored uninterpolated with their definition site and resolved
//! on read.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::log_level::{LogLevel, ParseLogLevelError};
use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::interpolation::{interpolate, Interpolator};

/// Name of the section every other section inherits from.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Keys are case-insensitive; they are stored lower-cased.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Where a raw value was defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File path, or `<template>` for the embedded defaults
    pub origin: String,
    /// 1-based line number of the `key = value` line
    pub line: usize,
}

/// A raw, uninterpolated value together with its definition site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Raw value with `%(name)s` references left in place
    pub value: String,
    /// Definition site
    pub location: Location,
}

impl Entry {
    /// Create an entry defined at `origin:line`.
    pub fn new(value: impl Into<String>, origin: impl Into<String>, line: usize) -> Self {
        Self {
            value: value.into(),
            location: Location {
                origin: origin.into(),
                line,
            },
        }
    }
}

/// A named, ordered group of raw key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: IndexMap<String, Entry>,
}

impl Section {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    /// Section name as written in its header.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local entry for `key`, ignoring DEFAULT.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(&normalize_key(key))
    }

    /// Mutable local entry for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.entries.get_mut(&normalize_key(key))
    }

    /// Whether `key` is defined locally.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// Insert or replace a local entry, keeping the original position on replace.
    pub fn insert(&mut self, key: &str, entry: Entry) -> Option<Entry> {
        self.entries.insert(normalize_key(key), entry)
    }

    /// Local keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Local entries in definition order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Number of local entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the section defines nothing locally.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// How an override document combines with the document it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Overlay key by key; untouched keys and sections survive.
    #[default]
    Merge,
    /// Discard the base document entirely.
    Replace,
}

/// Returned when a token is neither `merge` nor `replace`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid merge policy: {0}. Must be one of: merge, replace")]
pub struct ParseMergePolicyError(pub String);

impl MergePolicy {
    /// Lower-case token used on the command line and in the environment.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergePolicy {
    type Err = ParseMergePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "merge" => Ok(Self::Merge),
            "replace" => Ok(Self::Replace),
            other => Err(ParseMergePolicyError(other.to_string())),
        }
    }
}

/// A parsed configuration file: the DEFAULT section plus named sections.
///
/// Immutable once handed out by the loader. Consumers receive a
/// `&ConfigDocument`; there is no process-wide instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDocument {
    /// An empty document with an empty DEFAULT section.
    pub fn new() -> Self {
        Self {
            defaults: Section::new(DEFAULT_SECTION),
            sections: IndexMap::new(),
        }
    }

    /// The DEFAULT section.
    pub fn defaults(&self) -> &Section {
        &self.defaults
    }

    /// Section `name`, created empty if absent. `DEFAULT` maps to the defaults.
    pub fn section_entry(&mut self, name: &str) -> &mut Section {
        if name == DEFAULT_SECTION {
            return &mut self.defaults;
        }
        self.sections
            .entry(name.to_string())
            .or_insert_with(|| Section::new(name))
    }

    /// Whether `name` is DEFAULT or a defined section.
    pub fn has_section(&self, name: &str) -> bool {
        name == DEFAULT_SECTION || self.sections.contains_key(name)
    }

    /// Names of the non-DEFAULT sections in definition order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Section `name`, or `NoSection`.
    pub fn section(&self, name: &str) -> ConfigResult<&Section> {
        if name == DEFAULT_SECTION {
            return Ok(&self.defaults);
        }
        self.sections
            .get(name)
            .ok_or_else(|| ConfigError::NoSection(name.to_string()))
    }

    /// Raw entry for `key` as seen from `section`: local first, then DEFAULT.
    pub fn lookup(&self, section: &str, key: &str) -> ConfigResult<&Entry> {
        let local = self.section(section)?;
        local
            .get(key)
            .or_else(|| self.defaults.get(key))
            .ok_or_else(|| ConfigError::KeyNotFound {
                section: section.to_string(),
                key: normalize_key(key),
            })
    }

    /// Whether `key` is visible from `section`.
    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.lookup(section, key).is_ok()
    }

    /// Effective keys of `section`: local keys in order, then inherited ones.
    pub fn keys(&self, section: &str) -> ConfigResult<Vec<String>> {
        let local = self.section(section)?;
        let mut keys: Vec<String> = local.keys().map(str::to_string).collect();
        if section != DEFAULT_SECTION {
            keys.extend(
                self.defaults
                    .keys()
                    .filter(|key| !local.contains_key(key))
                    .map(str::to_string),
            );
        }
        Ok(keys)
    }

    /// The uninterpolated value of `key` as seen from `section`.
    pub fn get_raw(&self, section: &str, key: &str) -> ConfigResult<&str> {
        self.lookup(section, key).map(|entry| entry.value.as_str())
    }

    /// The fully interpolated value of `key` as seen from `section`.
    pub fn get(&self, section: &str, key: &str) -> ConfigResult<String> {
        interpolate(self, section, key)
    }

    /// Like [`get`](Self::get), with a leading `~` replaced by the home directory.
    pub fn get_path(&self, section: &str, key: &str) -> ConfigResult<PathBuf> {
        expand_tilde(&self.get(section, key)?)
    }

    /// Parse the value of `key` as a [`LogLevel`].
    pub fn get_log_level(&self, section: &str, key: &str) -> ConfigResult<LogLevel> {
        self.get(section, key)?
            .parse()
            .map_err(|ParseLogLevelError(value)| ConfigError::InvalidEnumValue {
                section: section.to_string(),
                key: normalize_key(key),
                value,
            })
    }

    /// Whitespace-separated list; an empty value is an empty list.
    pub fn get_list(&self, section: &str, key: &str) -> ConfigResult<Vec<String>> {
        Ok(self
            .get(section, key)?
            .split_whitespace()
            .map(str::to_string)
            .collect())
    }

    /// Effective `(key, interpolated value)` pairs of `section`.
    pub fn items(&self, section: &str) -> ConfigResult<Vec<(String, String)>> {
        let mut view = Interpolator::new(self, section);
        self.keys(section)?
            .into_iter()
            .map(|key| {
                let value = view.value(&key)?;
                Ok((key, value))
            })
            .collect()
    }

    /// Resolve every key of every section once.
    ///
    /// Surfaces dangling references, bad `%` syntax and cycles at load time
    /// rather than on first access.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut defaults = Interpolator::new(self, DEFAULT_SECTION);
        for key in self.defaults.keys() {
            defaults.value(key)?;
        }
        for name in self.sections.keys() {
            let mut view = Interpolator::new(self, name);
            for key in self.keys(name)? {
                view.value(&key)?;
            }
        }
        Ok(())
    }

    /// Combine `overlay` with `self` according to `policy`.
    ///
    /// The result is not validated; the loader does that once the final
    /// document is assembled.
    pub fn merge(mut self, overlay: Self, policy: MergePolicy) -> Self {
        match policy {
            MergePolicy::Replace => overlay,
            MergePolicy::Merge => {
                for (key, entry) in overlay.defaults.entries {
                    self.defaults.entries.insert(key, entry);
                }
                for (name, section) in overlay.sections {
                    let target = self.section_entry(&name);
                    for (key, entry) in section.entries {
                        target.entries.insert(key, entry);
                    }
                }
                self
            }
        }
    }
}

/// Replace a leading `~` token with the invoking user's home directory.
///
/// Only `~` on its own or followed by a separator is expanded; `~user`
/// is returned unchanged.
pub fn expand_tilde(value: &str) -> ConfigResult<PathBuf> {
    let rest = if value == "~" {
        Some("")
    } else if let Some(rest) = value.strip_prefix("~/") {
        Some(rest)
    } else if cfg!(windows) {
        value.strip_prefix("~\\")
    } else {
        None
    };

    match rest {
        Some(rest) => {
            let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
            Ok(if rest.is_empty() { home } else { home.join(rest) })
        }
        None => Ok(PathBuf::from(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConfigDocument {
        let mut doc = ConfigDocument::new();
        let defaults = doc.section_entry(DEFAULT_SECTION);
        defaults.insert("configdir", Entry::new("/home/u", "test", 1));
        defaults.insert("qscriptdir", Entry::new("%(configdir)s/qscripts", "test", 2));
        defaults.insert("logfilename", Entry::new("default.log", "test", 3));

        let logging = doc.section_entry("Logging");
        logging.insert("loglevel_console", Entry::new("INFO", "test", 5));
        logging.insert("loglevel_file", Entry::new("VERBOSE", "test", 6));

        let tools = doc.section_entry("ToolFamily");
        tools.insert("logfilename", Entry::new("tools.log", "test", 8));
        tools.insert("tools", Entry::new("gmx  gmx_d\n  grompp", "test", 9));
        tools.insert("release", Entry::new("", "test", 10));
        doc
    }

    #[test]
    fn test_get_interpolates_within_default() {
        let doc = sample();
        assert_eq!(
            doc.get(DEFAULT_SECTION, "qscriptdir").unwrap(),
            "/home/u/qscripts"
        );
    }

    #[test]
    fn test_default_inheritance_and_local_override() {
        let doc = sample();
        assert_eq!(doc.get("Logging", "logfilename").unwrap(), "default.log");
        assert_eq!(doc.get("ToolFamily", "logfilename").unwrap(), "tools.log");
        assert_eq!(doc.get("Logging", "qscriptdir").unwrap(), "/home/u/qscripts");
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let doc = sample();
        assert_eq!(doc.get("Logging", "LogLevel_Console").unwrap(), "INFO");
    }

    #[test]
    fn test_missing_key_is_key_not_found() {
        let doc = sample();
        let err = doc.get("Logging", "tools").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::KeyNotFound { ref section, ref key } if section == "Logging" && key == "tools"
        ));
    }

    #[test]
    fn test_missing_section_is_no_section() {
        let doc = sample();
        assert!(matches!(
            doc.get("Gromacs", "release"),
            Err(ConfigError::NoSection(name)) if name == "Gromacs"
        ));
        assert!(doc.has_section(DEFAULT_SECTION));
        assert!(!doc.has_section("Gromacs"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let doc = sample();
        assert_eq!(doc.get("ToolFamily", "release").unwrap(), "");
        assert!(doc.get_list("ToolFamily", "release").unwrap().is_empty());
    }

    #[test]
    fn test_get_list_splits_on_any_whitespace() {
        let doc = sample();
        assert_eq!(
            doc.get_list("ToolFamily", "tools").unwrap(),
            vec!["gmx", "gmx_d", "grompp"]
        );
    }

    #[test]
    fn test_get_log_level() {
        let doc = sample();
        assert_eq!(
            doc.get_log_level("Logging", "loglevel_console").unwrap(),
            LogLevel::Info
        );
        match doc.get_log_level("Logging", "loglevel_file").unwrap_err() {
            ConfigError::InvalidEnumValue { section, key, value } => {
                assert_eq!(section, "Logging");
                assert_eq!(key, "loglevel_file");
                assert_eq!(value, "VERBOSE");
            }
            other => panic!("Expected InvalidEnumValue, got {other:?}"),
        }
    }

    #[test]
    fn test_keys_lists_local_then_inherited() {
        let doc = sample();
        assert_eq!(
            doc.keys("ToolFamily").unwrap(),
            vec!["logfilename", "tools", "release", "configdir", "qscriptdir"]
        );
        assert_eq!(
            doc.keys(DEFAULT_SECTION).unwrap(),
            vec!["configdir", "qscriptdir", "logfilename"]
        );
    }

    #[test]
    fn test_items_are_interpolated() {
        let doc = sample();
        let items = doc.items("Logging").unwrap();
        assert!(items.contains(&("qscriptdir".to_string(), "/home/u/qscripts".to_string())));
    }

    #[test]
    fn test_get_raw_keeps_reference() {
        let doc = sample();
        assert_eq!(
            doc.get_raw(DEFAULT_SECTION, "qscriptdir").unwrap(),
            "%(configdir)s/qscripts"
        );
    }

    #[test]
    fn test_sections_excludes_default() {
        let doc = sample();
        assert_eq!(doc.sections().collect::<Vec<_>>(), vec!["Logging", "ToolFamily"]);
    }

    #[test]
    fn test_merge_overlays_keys() {
        let base = sample();
        let mut overlay = ConfigDocument::new();
        overlay
            .section_entry(DEFAULT_SECTION)
            .insert("configdir", Entry::new("/srv/conf", "user", 1));
        overlay
            .section_entry("Extra")
            .insert("answer", Entry::new("42", "user", 3));

        let merged = base.merge(overlay, MergePolicy::Merge);
        assert_eq!(merged.get(DEFAULT_SECTION, "qscriptdir").unwrap(), "/srv/conf/qscripts");
        assert_eq!(merged.get("Logging", "loglevel_console").unwrap(), "INFO");
        assert_eq!(merged.get("Extra", "answer").unwrap(), "42");
        assert_eq!(
            merged.sections().collect::<Vec<_>>(),
            vec!["Logging", "ToolFamily", "Extra"]
        );
    }

    #[test]
    fn test_merge_replace_discards_base() {
        let base = sample();
        let mut overlay = ConfigDocument::new();
        overlay
            .section_entry("Logging")
            .insert("loglevel_console", Entry::new("ERROR", "user", 2));

        let replaced = base.merge(overlay, MergePolicy::Replace);
        assert!(!replaced.has_section("ToolFamily"));
        assert!(replaced.get("Logging", "logfilename").is_err());
    }

    #[test]
    fn test_merge_policy_parsing() {
        assert_eq!("merge".parse::<MergePolicy>(), Ok(MergePolicy::Merge));
        assert_eq!("REPLACE".parse::<MergePolicy>(), Ok(MergePolicy::Replace));
        assert!("union".parse::<MergePolicy>().is_err());
        assert_eq!(MergePolicy::default(), MergePolicy::Merge);
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/etc/app").unwrap(), PathBuf::from("/etc/app"));
        assert_eq!(expand_tilde("rel/path").unwrap(), PathBuf::from("rel/path"));
        assert_eq!(expand_tilde("~other/x").unwrap(), PathBuf::from("~other/x"));
    }

    #[cfg(unix)]
    #[test]
    fn test_expand_tilde_uses_home() {
        temp_env::with_var("HOME", Some("/home/tester"), || {
            assert_eq!(expand_tilde("~").unwrap(), PathBuf::from("/home/tester"));
            assert_eq!(
                expand_tilde("~/.appconfig/qscripts").unwrap(),
                PathBuf::from("/home/tester/.appconfig/qscripts")
            );
        });
    }
}

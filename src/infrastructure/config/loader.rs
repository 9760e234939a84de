//! Validated loading from memory, files and the embedded template.

use std::path::Path;

use tracing::debug;

use super::options::RuntimeOptions;
use super::parser;
use super::template::{DEFAULT_TEMPLATE, TEMPLATE_ORIGIN};
use crate::domain::errors::{ConfigError, ConfigResult};
use crate::domain::models::document::{ConfigDocument, MergePolicy};

/// Configuration loader producing validated, immutable documents
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse and validate configuration text held in memory
    ///
    /// `origin` names the source in error messages.
    pub fn parse_str(text: &str, origin: &str) -> ConfigResult<ConfigDocument> {
        let doc = parser::parse(text, origin)?;
        doc.validate()?;
        debug!(
            origin,
            sections = doc.sections().count(),
            defaults = doc.defaults().len(),
            "configuration parsed"
        );
        Ok(doc)
    }

    /// The embedded default template
    pub fn template() -> ConfigResult<ConfigDocument> {
        Self::parse_str(DEFAULT_TEMPLATE, TEMPLATE_ORIGIN)
    }

    /// Load configuration from a specific file
    ///
    /// Fails on unreadable files, malformed lines, duplicates, bad `%` syntax,
    /// circular references and references that resolve nowhere.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<ConfigDocument> {
        let path = path.as_ref();
        let text = read(path)?;
        Self::parse_str(&text, &path.display().to_string())
    }

    /// Combine two documents and validate the result
    ///
    /// The overlay need not be valid on its own: it may reference keys that
    /// only the base defines.
    pub fn merge(
        base: ConfigDocument,
        overlay: ConfigDocument,
        policy: MergePolicy,
    ) -> ConfigResult<ConfigDocument> {
        let merged = base.merge(overlay, policy);
        merged.validate()?;
        debug!(%policy, sections = merged.sections().count(), "configuration merged");
        Ok(merged)
    }

    /// Apply a user override file on top of `base`
    pub fn load_with_override(
        base: ConfigDocument,
        override_path: impl AsRef<Path>,
        policy: MergePolicy,
    ) -> ConfigResult<ConfigDocument> {
        let path = override_path.as_ref();
        let text = read(path)?;
        let overlay = parser::parse(&text, &path.display().to_string())?;
        Self::merge(base, overlay, policy)
    }

    /// Load configuration as directed by runtime options
    ///
    /// Precedence (lowest to highest):
    /// 1. The configured file, or the embedded template when none is set
    /// 2. The override file, combined per `merge_policy`
    pub fn load_runtime(options: &RuntimeOptions) -> ConfigResult<ConfigDocument> {
        let base = match &options.config_file {
            Some(path) => Self::load(path)?,
            None => Self::template()?,
        };

        match &options.override_file {
            Some(path) => Self::load_with_override(base, path, options.merge_policy),
            None => Ok(base),
        }
    }
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

//! Create the configured directories and write the default template.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use super::template::DEFAULT_TEMPLATE;
use crate::domain::errors::ConfigResult;
use crate::domain::models::document::ConfigDocument;
use crate::domain::models::settings::Directories;

/// What [`setup`] changed on disk.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    /// Directories that did not exist before
    pub directories_created: Vec<PathBuf>,
    /// The configuration file, when it was written
    pub config_written: Option<PathBuf>,
}

/// A configured directory that is not present on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDirectory {
    /// DEFAULT key naming the directory
    pub key: &'static str,
    /// Expanded path
    pub path: PathBuf,
}

/// Create every configured directory and write the template to `config_file`.
///
/// Existing directories are left alone and an existing `config_file` is never
/// overwritten.
pub fn setup(doc: &ConfigDocument, config_file: &Path) -> Result<SetupReport> {
    let directories =
        Directories::from_document(doc).context("Failed to resolve configured directories")?;
    let mut report = SetupReport::default();

    for (key, dir) in directories.all() {
        if dir.is_dir() {
            debug!(key, path = %dir.display(), "directory already present");
            continue;
        }
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        info!(key, path = %dir.display(), "created directory");
        report.directories_created.push(dir.to_path_buf());
    }

    if config_file.exists() {
        debug!(path = %config_file.display(), "configuration file already present");
    } else {
        if let Some(parent) = config_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(config_file, DEFAULT_TEMPLATE)
            .with_context(|| format!("Failed to write {}", config_file.display()))?;
        info!(path = %config_file.display(), "wrote default configuration");
        report.config_written = Some(config_file.to_path_buf());
    }

    Ok(report)
}

/// Directories named in DEFAULT that do not exist yet.
pub fn check_setup(doc: &ConfigDocument) -> ConfigResult<Vec<MissingDirectory>> {
    let directories = Directories::from_document(doc)?;
    Ok(directories
        .all()
        .into_iter()
        .filter(|(_, path)| !path.is_dir())
        .map(|(key, path)| MissingDirectory {
            key,
            path: path.to_path_buf(),
        })
        .collect())
}

//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write `contents` to `dir/name` and return the path
pub fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write config file");
    path
}

/// The template as a user would customise it, with `configdir` rooted at `root`
#[allow(dead_code)]
pub fn rooted_config(root: &Path) -> String {
    format!(
        "[DEFAULT]\n\
         configdir = {}\n\
         qscriptdir = %(configdir)s/qscripts\n\
         templatesdir = %(configdir)s/templates\n\
         \n\
         [ToolFamily]\n\
         release = 2024.1\n\
         ## tools = gmx gmx_d\n\
         groups =\n\
         \n\
         [Logging]\n\
         logfilename = app.log\n\
         loglevel_console = INFO\n\
         loglevel_file = DEBUG\n",
        root.display()
    )
}

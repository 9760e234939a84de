//! `setup` and `check`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::CommandOutput;
use crate::domain::models::document::ConfigDocument;
use crate::domain::models::settings::Directories;
use crate::infrastructure::config::{self, MissingDirectory, SetupReport, CONFIG_FILENAME};

#[derive(Debug, Serialize)]
pub struct SetupOutput {
    pub success: bool,
    #[serde(flatten)]
    pub report: SetupReport,
}

impl CommandOutput for SetupOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        if self.report.directories_created.is_empty() && self.report.config_written.is_none() {
            lines.push("Configuration already set up; nothing to do.".to_string());
        } else {
            lines.push("Configuration set up successfully.".to_string());
        }
        if !self.report.directories_created.is_empty() {
            lines.push("\nCreated directories:".to_string());
            for dir in &self.report.directories_created {
                lines.push(format!("  - {}", dir.display()));
            }
        }
        if let Some(ref file) = self.report.config_written {
            lines.push(format!("\nWrote default configuration to {}", file.display()));
        }
        lines.join("\n")
    }
}

/// `setup [--file FILE]`
pub fn setup(doc: &ConfigDocument, file: Option<&Path>) -> Result<SetupOutput> {
    let config_file: PathBuf = match file {
        Some(file) => file.to_path_buf(),
        None => Directories::from_document(doc)?.configdir.join(CONFIG_FILENAME),
    };
    let report = config::setup(doc, &config_file)?;
    Ok(SetupOutput {
        success: true,
        report,
    })
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub ok: bool,
    pub missing: Vec<MissingDirectory>,
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        if self.ok {
            return "All configured directories exist.".to_string();
        }
        let mut lines = vec!["Missing directories (run `wrapconf setup`):".to_string()];
        for missing in &self.missing {
            lines.push(format!("  - {} = {}", missing.key, missing.path.display()));
        }
        lines.join("\n")
    }
}

/// `check`
pub fn check(doc: &ConfigDocument) -> Result<CheckOutput> {
    let missing = config::check_setup(doc)?;
    Ok(CheckOutput {
        ok: missing.is_empty(),
        missing,
    })
}

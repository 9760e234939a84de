//! Read-only commands: `show`, `get`, `path`, `loglevel` and `tools`.

use anyhow::Result;
use serde::Serialize;

use crate::cli::display::render_section;
use crate::cli::output::CommandOutput;
use crate::domain::models::document::{ConfigDocument, DEFAULT_SECTION};
use crate::domain::models::log_level::LogLevel;
use crate::domain::models::settings::{ToolFamily, LOGGING_SECTION};

/// One effective entry of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    pub key: String,
    pub value: String,
    /// True when the entry comes from DEFAULT
    pub inherited: bool,
    /// `origin:line` of the raw value
    pub defined_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub name: String,
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub sections: Vec<SectionView>,
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        self.sections
            .iter()
            .map(|section| render_section(&section.name, &section.entries))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn section_view(doc: &ConfigDocument, name: &str, raw: bool) -> Result<SectionView> {
    let local = doc.section(name)?;
    let entries = doc
        .keys(name)?
        .into_iter()
        .map(|key| {
            let entry = doc.lookup(name, &key)?;
            let value = if raw {
                entry.value.clone()
            } else {
                doc.get(name, &key)?
            };
            Ok(EntryView {
                inherited: !local.contains_key(&key),
                defined_at: format!("{}:{}", entry.location.origin, entry.location.line),
                key,
                value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SectionView {
        name: name.to_string(),
        entries,
    })
}

/// `show [SECTION] [--raw]`
pub fn show(doc: &ConfigDocument, section: Option<&str>, raw: bool) -> Result<ShowOutput> {
    let names: Vec<&str> = match section {
        Some(name) => vec![name],
        None => std::iter::once(DEFAULT_SECTION).chain(doc.sections()).collect(),
    };

    let sections = names
        .into_iter()
        .map(|name| section_view(doc, name, raw))
        .collect::<Result<Vec<_>>>()?;
    Ok(ShowOutput { sections })
}

#[derive(Debug, Serialize)]
pub struct ValueOutput {
    pub section: String,
    pub key: String,
    pub value: String,
}

impl CommandOutput for ValueOutput {
    fn to_human(&self) -> String {
        self.value.clone()
    }
}

/// `get SECTION KEY`
pub fn get(doc: &ConfigDocument, section: &str, key: &str) -> Result<ValueOutput> {
    Ok(ValueOutput {
        section: section.to_string(),
        key: key.to_string(),
        value: doc.get(section, key)?,
    })
}

/// `path SECTION KEY`
pub fn path(doc: &ConfigDocument, section: &str, key: &str) -> Result<ValueOutput> {
    Ok(ValueOutput {
        section: section.to_string(),
        key: key.to_string(),
        value: doc.get_path(section, key)?.display().to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct LogLevelOutput {
    pub key: String,
    pub level: LogLevel,
}

impl CommandOutput for LogLevelOutput {
    fn to_human(&self) -> String {
        self.level.to_string()
    }
}

/// `loglevel KEY`
pub fn loglevel(doc: &ConfigDocument, key: &str) -> Result<LogLevelOutput> {
    Ok(LogLevelOutput {
        key: key.to_string(),
        level: doc.get_log_level(LOGGING_SECTION, key)?,
    })
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ToolsOutput(pub ToolFamily);

impl CommandOutput for ToolsOutput {
    fn to_human(&self) -> String {
        let list = |items: &[String]| {
            if items.is_empty() {
                "(none)".to_string()
            } else {
                items.join(" ")
            }
        };
        format!(
            "release: {}\ntools:   {}\ngroups:  {}",
            self.0.release.as_deref().unwrap_or("(unset)"),
            list(&self.0.tools),
            list(&self.0.groups),
        )
    }
}

/// `tools`
pub fn tools(doc: &ConfigDocument) -> Result<ToolsOutput> {
    Ok(ToolsOutput(ToolFamily::from_document(doc)?))
}

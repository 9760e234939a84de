//! CLI command implementations.

pub mod query;
pub mod setup;
pub mod template;

use anyhow::Result;

use crate::cli::output::output;
use crate::cli::types::Commands;
use crate::domain::models::document::ConfigDocument;

/// Run `command` against an already loaded document.
pub fn execute(command: &Commands, doc: &ConfigDocument, json_mode: bool) -> Result<()> {
    match command {
        Commands::Show { section, raw } => {
            output(&query::show(doc, section.as_deref(), *raw)?, json_mode);
        }
        Commands::Get { section, key } => output(&query::get(doc, section, key)?, json_mode),
        Commands::Path { section, key } => output(&query::path(doc, section, key)?, json_mode),
        Commands::Loglevel { key } => output(&query::loglevel(doc, key)?, json_mode),
        Commands::Tools => output(&query::tools(doc)?, json_mode),
        Commands::Check => output(&setup::check(doc)?, json_mode),
        Commands::Setup { file } => output(&setup::setup(doc, file.as_deref())?, json_mode),
        Commands::Template => output(&template::template(), json_mode),
    }
    Ok(())
}

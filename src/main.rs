//! wrapconf CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;

use wrapconf::cli::Cli;
use wrapconf::infrastructure::config::{ConfigLoader, RuntimeOptions};

fn run(cli: &Cli) -> Result<()> {
    let options = RuntimeOptions::load()?.with_overrides(
        cli.config.clone(),
        cli.override_file.clone(),
        cli.merge_policy,
        cli.log_format,
    );

    let doc = ConfigLoader::load_runtime(&options).context("Failed to load configuration")?;
    let _logger = wrapconf::cli::init_logging(&doc, cli.log_to_file, options.log_format)?;

    wrapconf::cli::commands::execute(&cli.command, &doc, cli.json)
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        wrapconf::cli::handle_error(&err, cli.json);
    }
}

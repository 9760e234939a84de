//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::models::document::MergePolicy;
use crate::infrastructure::logging::config::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "wrapconf")]
#[command(about = "Inspect and set up the tool wrapper configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base configuration file (defaults to the embedded template)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// User override file applied on top of the base configuration
    #[arg(short = 'o', long = "override", global = true, value_name = "FILE")]
    pub override_file: Option<PathBuf>,

    /// How the override combines with the base (merge, replace)
    #[arg(long, global = true, value_name = "POLICY")]
    pub merge_policy: Option<MergePolicy>,

    /// Console log format (pretty, json)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Also write logs to the file named by [Logging] logfilename
    #[arg(long, global = true)]
    pub log_to_file: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show sections with their effective entries
    Show {
        /// Only show this section
        section: Option<String>,

        /// Show raw values instead of interpolated ones
        #[arg(long)]
        raw: bool,
    },

    /// Print the interpolated value of a key
    Get {
        /// Section name (DEFAULT for the inherited section)
        section: String,
        /// Key name
        key: String,
    },

    /// Print a key as a path, with a leading ~ expanded
    Path {
        /// Section name
        section: String,
        /// Key name
        key: String,
    },

    /// Print a log level from the [Logging] section
    Loglevel {
        /// Key name, e.g. loglevel_console
        key: String,
    },

    /// Show the tool family configuration
    Tools,

    /// List configured directories that do not exist yet
    Check,

    /// Create the configured directories and write the default configuration file
    Setup {
        /// Where to write the configuration file (defaults to <configdir>/wrapconf.cfg)
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Print the embedded default template
    Template,
}

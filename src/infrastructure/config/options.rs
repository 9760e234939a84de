//! Runtime options: which files to load and how to combine them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::models::document::MergePolicy;
use crate::infrastructure::logging::config::LogFormat;

/// Prefix of the environment variables read by [`RuntimeOptions::load`].
pub const ENV_PREFIX: &str = "WRAPCONF_";

/// Where the wrapper finds its configuration, and how an override applies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RuntimeOptions {
    /// Base configuration file; the embedded template when `None`
    #[serde(default)]
    pub config_file: Option<PathBuf>,

    /// Optional user override applied on top of the base
    #[serde(default)]
    pub override_file: Option<PathBuf>,

    /// How the override combines with the base
    #[serde(default)]
    pub merge_policy: MergePolicy,

    /// Console log format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl RuntimeOptions {
    /// Load runtime options with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. Environment variables (`WRAPCONF_*` prefix)
    ///
    /// Command-line flags are applied afterwards with [`Self::with_overrides`].
    pub fn load() -> Result<Self> {
        Self::figment()
            .extract()
            .context("Failed to extract runtime options from figment")
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Replace each option that is given explicitly
    #[must_use]
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        override_file: Option<PathBuf>,
        merge_policy: Option<MergePolicy>,
        log_format: Option<LogFormat>,
    ) -> Self {
        if config_file.is_some() {
            self.config_file = config_file;
        }
        if override_file.is_some() {
            self.override_file = override_file;
        }
        if let Some(policy) = merge_policy {
            self.merge_policy = policy;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        self
    }
}

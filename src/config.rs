//! User configuration
//!
//! Looked up in order: `--config <path>`, `$PLANSUM_CONFIG`, then
//! `<config dir>/plansum/config.yaml`. An explicitly named file must exist;
//! the default location is optional. Command-line flags override every
//! value loaded here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::traits::FileSystem;

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "PLANSUM_CONFIG";

const CONFIG_DIR: &str = "plansum";
const CONFIG_FILE: &str = "config.yaml";

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Html,
}

/// Settings read from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default report format
    pub format: OutputFormat,

    /// Executor used for binary plan files (`tofu` or `terraform`)
    pub executor: String,

    /// Show resource bodies in text reports
    pub show_bodies: bool,

    /// Colorize text reports written to a terminal
    pub color: bool,

    /// Truncate bodies after this many lines (0 = unlimited)
    pub max_body_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            executor: "tofu".to_string(),
            show_bodies: false,
            color: true,
            max_body_lines: 40,
        }
    }
}

/// Where a config file came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` flag or `$PLANSUM_CONFIG`; must exist
    Explicit(PathBuf),
    /// Per-user default location; may be absent
    Default(PathBuf),
}

/// Loader for the config file
pub struct ConfigLoader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Pick the config file location
    pub fn resolve(explicit: Option<&Path>, env_value: Option<String>) -> Option<ConfigSource> {
        if let Some(path) = explicit {
            return Some(ConfigSource::Explicit(path.to_path_buf()));
        }

        if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
            return Some(ConfigSource::Explicit(PathBuf::from(value)));
        }

        dirs::config_dir().map(|dir| ConfigSource::Default(dir.join(CONFIG_DIR).join(CONFIG_FILE)))
    }

    /// Load configuration, falling back to defaults when no file applies
    pub fn load(&self, explicit: Option<&Path>) -> Result<Config> {
        let env_value = std::env::var(CONFIG_ENV_VAR).ok();
        self.load_from(Self::resolve(explicit, env_value))
    }

    /// Load configuration from an already resolved source
    pub fn load_from(&self, source: Option<ConfigSource>) -> Result<Config> {
        let path = match source {
            None => return Ok(Config::default()),
            Some(ConfigSource::Default(path)) if !self.fs.exists(&path) => {
                return Ok(Config::default());
            }
            Some(ConfigSource::Explicit(path)) | Some(ConfigSource::Default(path)) => path,
        };

        let content = self
            .fs
            .read_to_string(&path)
            .with_context(|| format!("Failed to load config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

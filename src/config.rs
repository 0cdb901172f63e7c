//! Layered configuration for reqctl.
//!
//! Values come from three layers, each overriding the one before it:
//! built-in defaults, the global config file at
//! `~/.config/reqctl/config.yaml`, and `REQCTL_*` environment variables.
//! Command-line flags override all of it at the call site.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::resolver::DEFAULT_RESOLVE_TIMEOUT;
use crate::validate::ValidatorOptions;

/// Serialization format for emitted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub resolution: ResolutionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolutionConfig {
    /// Allow hostnames in `ipAddress` fields to be resolved and rewritten
    /// to their first resolved address.
    #[serde(default = "default_allow_fqdn")]
    pub allow_fqdn: bool,
    /// Upper bound on a single hostname lookup, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        ResolutionConfig {
            allow_fqdn: default_allow_fqdn(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ResolutionConfig {
    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("resolution.timeout_secs must be greater than 0");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_allow_fqdn() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_RESOLVE_TIMEOUT.as_secs()
}

impl Config {
    /// Load configuration: defaults, then the global config file if one
    /// exists, then environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match global_config_path() {
            Some(path) if path.exists() => Config::load_from(&path)?,
            _ => Config::default(),
        };
        config.apply_env();
        config.resolution.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Config::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content).context("Failed to parse config")?;
        config.resolution.validate()?;
        Ok(config)
    }

    /// Overrides from `REQCTL_ALLOW_FQDN`, `REQCTL_RESOLVE_TIMEOUT_SECS`,
    /// and `REQCTL_FORMAT`. Unparseable values are ignored.
    fn apply_env(&mut self) {
        if let Ok(value) = std::env::var("REQCTL_ALLOW_FQDN") {
            if let Some(flag) = parse_bool(&value) {
                self.resolution.allow_fqdn = flag;
            }
        }
        if let Ok(value) = std::env::var("REQCTL_RESOLVE_TIMEOUT_SECS") {
            if let Ok(secs) = value.parse::<u64>() {
                self.resolution.timeout_secs = secs;
            }
        }
        if let Ok(value) = std::env::var("REQCTL_FORMAT") {
            if let Ok(format) = OutputFormat::from_str(&value, true) {
                self.output.format = format;
            }
        }
    }

    /// The validator options this configuration describes.
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            allow_fqdn: self.resolution.allow_fqdn,
        }
    }

    /// Bound for a single hostname lookup.
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolution.timeout_secs)
    }
}

/// Returns the path to the global config file at ~/.config/reqctl/config.yaml
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reqctl").join("config.yaml"))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Configuration support
//!
//! Loads optional per-workspace settings from `auditready.toml`:
//!
//! ```toml
//! # auditready.toml
//!
//! [data]
//! practice_dir = "data/practice"
//! claim_dir = "data/claim"
//!
//! [output]
//! format = "text"
//!
//! [ci]
//! fail_on = "critical"
//! ```
//!
//! Configuration is advisory: a missing or broken file logs a warning and
//! falls back to defaults, and CLI flags always win over file values.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "auditready.toml";

/// Workspace configuration loaded from `auditready.toml`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Data set locations
    #[serde(default)]
    pub data: DataConfig,

    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,

    /// CI behavior
    #[serde(default)]
    pub ci: CiConfig,
}

/// Where the document sets live
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DataConfig {
    /// Practice-inspection document set root
    #[serde(default)]
    pub practice_dir: Option<PathBuf>,

    /// Claim-readiness document set root
    #[serde(default)]
    pub claim_dir: Option<PathBuf>,
}

/// Default output settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format (text, json, csv)
    #[serde(default)]
    pub format: Option<String>,
}

/// CI gating settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CiConfig {
    /// Severity threshold that fails the run (e.g. "critical", "warning")
    #[serde(default)]
    pub fail_on: Option<String>,
}

/// Load configuration, preferring an explicit `--config` path over
/// `auditready.toml` in the working directory. Returns defaults when
/// nothing is found or the file does not parse.
pub fn load_config(explicit: Option<&Path>) -> Config {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(CONFIG_FILE),
    };

    if path.exists() {
        match load_toml_config(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    } else if explicit.is_some() {
        warn!("Config file {} not found, using defaults", path.display());
    } else {
        debug!("No config file found, using defaults");
    }

    Config::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

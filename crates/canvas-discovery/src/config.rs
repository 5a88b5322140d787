//! Configuration loading and types

use std::path::{Path, PathBuf};

use canvas_core::PollerConfig;
use canvas_inventory::ProviderKind;
use serde::{Deserialize, Serialize};

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "CANVAS_CONFIG";

/// Top-level configuration for the discovery daemon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Daemon server settings
    #[serde(default)]
    pub daemon: DaemonConfig,
    /// Refresh cadence
    #[serde(default)]
    pub poller: PollerConfig,
    /// Inventory source
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Daemon server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Address and port to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Start with verbose logging switched on
    #[serde(default)]
    pub verbose: bool,
    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            log_level: default_log_level(),
            verbose: false,
            log_format: LogFormat::default(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8880".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Where the inventory comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// TOML inventory file, re-read on every refresh
    Static {
        path: PathBuf,
        /// Provider kind reported for the instances in the file
        #[serde(default = "default_static_kind")]
        instance_type: ProviderKind,
    },
}

fn default_static_kind() -> ProviderKind {
    ProviderKind::Static
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Static {
            path: PathBuf::from("inventory.toml"),
            instance_type: default_static_kind(),
        }
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not valid configuration
    pub fn parse(content: &str) -> eyre::Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.poller.interval_secs == 0 {
            eyre::bail!("poller.interval_secs must be greater than zero");
        }
        if config.poller.timeout_secs == 0 {
            eyre::bail!("poller.timeout_secs must be greater than zero");
        }
        Ok(config)
    }

    /// Find the configuration file to use, if any
    ///
    /// Checks `CANVAS_CONFIG`, then `./canvas.toml`, `/etc/canvas/canvas.toml`
    /// and the user config directory.
    #[must_use]
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut paths = vec![
            PathBuf::from("canvas.toml"),
            PathBuf::from("/etc/canvas/canvas.toml"),
        ];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("canvas/canvas.toml"));
        }

        paths.into_iter().find(|p| p.exists())
    }
}

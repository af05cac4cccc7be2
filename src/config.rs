//! Configuration for area-mirror
//!
//! Loads configuration from a TOML file, `~/.config/area-mirror/config.toml`
//! unless another path is given on the command line. Nothing is ever written:
//! without a file the built-in defaults apply.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::mirror::Timing;
use crate::region::{self, Region};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mirror: MirrorConfig,
    pub regions: Vec<Region>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirror: MirrorConfig::default(),
            regions: region::default_regions(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load_optional(&Self::config_path()?)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Read `path` if it exists, otherwise fall back to the defaults
    fn load_optional(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        info!("Config file not found at {:?}, using defaults", path);
        Ok(Self::default())
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        info!("Configuration loaded from {:?}", path);
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Reject settings the mirror loop cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.mirror.poll_interval_ms > 0, "mirror.poll_interval_ms must be positive");
        ensure!(
            self.mirror.discovery_interval_secs > 0,
            "mirror.discovery_interval_secs must be positive"
        );
        region::validate(&self.regions).context("Invalid region table")?;
        Ok(())
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("area-mirror");

        Ok(config_dir.join("config.toml"))
    }
}

/// Loop cadence and startup behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Delay between frames while a target is tracked
    pub poll_interval_ms: u64,
    /// Delay between searches while no target is held
    pub discovery_interval_secs: u64,
    /// Exit when the target is missing at startup instead of waiting for it
    pub fail_fast: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 16,
            discovery_interval_secs: 5,
            fail_fast: false,
        }
    }
}

impl MirrorConfig {
    pub fn timing(&self) -> Timing {
        Timing {
            poll: Duration::from_millis(self.poll_interval_ms),
            discovery: Duration::from_secs(self.discovery_interval_secs),
        }
    }
}

//! Application configuration, stored as TOML.
//!
//! Location: `$COACHDESK_CONFIG_DIR/config.toml` when the variable is set,
//! otherwise `<config dir>/coachdesk/config.toml`. A missing file is created
//! with defaults; missing keys fall back to their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dashboard::DashboardTab;
use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR: &str = "coachdesk";
const CONFIG_ENV_VAR: &str = "COACHDESK_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tab shown when the dashboard mounts.
    pub default_tab: DashboardTab,
    pub sidebar_collapsed: bool,
    /// JSON file with clients, exercises and routines. Sample data if unset.
    pub data_file: Option<PathBuf>,
    pub recent_clients_limit: usize,
    /// `tracing` filter directive, e.g. `info` or `coachdesk=debug`.
    pub log_level: String,
    /// Interval between UI ticks when no input arrives.
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tab: DashboardTab::Overview,
            sidebar_collapsed: false,
            data_file: None,
            recent_clients_limit: 5,
            log_level: "info".into(),
            tick_rate_ms: 250,
        }
    }
}

impl Config {
    /// Resolves the default config path, creating its directory if needed.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or(ConfigError::CannotDetermineConfigDir)?
                .join(APP_DIR),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Loads the config at `path`, writing defaults first if it does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            debug!(path = %path.display(), "wrote default config");
            return Ok(config);
        }
        let raw = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        Ok(config.sanitized())
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        if self.recent_clients_limit == 0 {
            warn!("recent_clients_limit must be positive, using default");
            self.recent_clients_limit = Self::default().recent_clients_limit;
        }
        if self.tick_rate_ms == 0 {
            warn!("tick_rate_ms must be positive, using default");
            self.tick_rate_ms = Self::default().tick_rate_ms;
        }
        self
    }
}

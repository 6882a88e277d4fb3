//! Configuration
//!
//! ## Resolution
//!
//! 1. Embedded defaults (`config/default.toml`, compiled into the binary)
//! 2. Override file: explicit path, else `~/.config/spendlens/config.toml`
//! 3. Environment: `SPENDLENS_API_URL`, `SPENDLENS_FORECAST_HORIZON`
//!
//! Later layers only replace the keys they set.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

pub const ENV_API_URL: &str = "SPENDLENS_API_URL";
pub const ENV_FORECAST_HORIZON: &str = "SPENDLENS_FORECAST_HORIZON";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the remote store
    pub api_url: String,
    /// Points projected by the spending trend
    pub forecast_horizon: usize,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001".to_string(),
            forecast_horizon: 5,
            request_timeout_secs: None,
        }
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_url: Option<String>,
    forecast_horizon: Option<usize>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load all layers, using `override_path` instead of the default location
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::from_toml(DEFAULT_CONFIG)?;

        let path = override_path
            .map(Path::to_path_buf)
            .or_else(default_config_path);
        if let Some(path) = path.filter(|p| p.exists()) {
            debug!(path = %path.display(), "Loading config override");
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            config.merge_toml(&content)?;
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a complete config from TOML on top of the built-in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config = Self::default();
        config.merge_toml(content)?;
        Ok(config)
    }

    fn merge_toml(&mut self, content: &str) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        if let Some(url) = raw.api_url {
            self.api_url = url;
        }
        if let Some(horizon) = raw.forecast_horizon {
            self.forecast_horizon = horizon;
        }
        if raw.request_timeout_secs.is_some() {
            self.request_timeout_secs = raw.request_timeout_secs;
        }
        Ok(())
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(horizon) = lookup(ENV_FORECAST_HORIZON) {
            self.forecast_horizon = horizon.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a positive integer", ENV_FORECAST_HORIZON))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::Config("api_url must not be empty".into()));
        }
        if self.forecast_horizon == 0 {
            return Err(Error::Config("forecast_horizon must be at least 1".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("spendlens").join("config.toml"))
}

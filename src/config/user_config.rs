//! User configuration for the catalog server
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::Paths;

/// Environment variable holding a comma-separated list of allowed CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "CATALOG_ALLOWED_ORIGINS";

/// User configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Identifies this server instance in logs
    #[serde(default)]
    pub server_id: String,

    /// Origins allowed by CORS; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// SQLite pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a store call may take before the request is answered with 503; 0 disables the limit
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            server_id: String::new(),
            allowed_origins: Vec::new(),
            max_connections: default_max_connections(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl UserConfig {
    /// Load configuration from the settings file, writing defaults on first run
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        Self::load_from(&paths.settings_path())
    }

    /// Save configuration to the settings file
    pub fn save(&self) -> Result<()> {
        let paths = Paths::get()?;
        self.save_to(&paths.settings_path())
    }

    pub fn load_from(settings_path: &Path) -> Result<Self> {
        if settings_path.exists() {
            let content =
                std::fs::read_to_string(settings_path).context("Failed to read settings file")?;
            let config: UserConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(settings_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, settings_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(settings_path, content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Apply overrides from the environment; these are not persisted
    pub fn apply_env_overrides(&mut self) {
        if let Ok(origins) = std::env::var(ALLOWED_ORIGINS_ENV) {
            self.allowed_origins = parse_origins(&origins);
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }

    /// Limit for each store call, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}

// Default value functions for serde

fn default_max_connections() -> u32 {
    5
}

fn default_request_timeout() -> u64 {
    30
}

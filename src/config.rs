//! Estimator configuration.
//!
//! Loaded from `<config dir>/effort-estimator/config.json` when present, then
//! overridden by environment variables:
//! - `ESTIMATOR_PORT` - HTTP port for `serve`
//! - `ESTIMATOR_DB` - Database file path
//! - `ESTIMATOR_SUGGEST_URL` - Size-suggestion endpoint (unset: offline suggestions)
//! - `ESTIMATOR_SUGGEST_KEY` - Bearer key for the suggestion endpoint

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::suggest::{FixedSuggester, HttpSuggester, SizeSuggester};

const APP_NAME: &str = "effort-estimator";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggesterConfig {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub port: u16,
    /// Overrides the platform data directory location.
    pub database_path: Option<PathBuf>,
    pub suggester: SuggesterConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_path: None,
            suggester: SuggesterConfig::default(),
        }
    }
}

impl EstimatorConfig {
    /// Load from the user's config directory and apply environment overrides.
    /// Falls back to defaults if the file is missing or fails to parse.
    pub fn load() -> Self {
        let config = match get_config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = var("ESTIMATOR_PORT").and_then(|s| s.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(path) = var("ESTIMATOR_DB") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(endpoint) = var("ESTIMATOR_SUGGEST_URL") {
            self.suggester.endpoint = Some(endpoint);
        }
        if let Some(key) = var("ESTIMATOR_SUGGEST_KEY") {
            self.suggester.api_key = Some(key);
        }
        self
    }

    /// Open (but do not migrate) the configured database.
    pub fn open_database(&self) -> Result<Database> {
        match &self.database_path {
            Some(path) => Database::open(path.clone()),
            None => Database::open_default(),
        }
    }

    /// Build the configured suggestion provider.
    pub fn suggester(&self) -> Arc<dyn SizeSuggester> {
        match &self.suggester.endpoint {
            Some(endpoint) => Arc::new(HttpSuggester::new(
                endpoint.clone(),
                self.suggester.api_key.clone(),
            )),
            None => Arc::new(FixedSuggester::default()),
        }
    }
}

fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

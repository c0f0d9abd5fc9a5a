//! Application configuration
//!
//! Read from `{data-dir}/config.toml`. Every key is optional:
//!
//! ```toml
//! catalogPath = "/usr/share/theologia/terms.json"
//! feedSize = 50
//! seed = 42
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feed::DEFAULT_QUEUE_SIZE;

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "theologia";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine data directory")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Bundled catalog file; defaults to `{data-dir}/terms.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Feed queue length
    pub feed_size: usize,
    /// Fixed RNG seed for reproducible feeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            feed_size: DEFAULT_QUEUE_SIZE,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Platform data directory for the app (e.g. ~/.local/share/theologia)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join(APP_DIR))
            .ok_or(ConfigError::DataDirNotFound)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `config.toml` from `data_dir`; a missing file means defaults
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config = Self::parse(&content)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Catalog location, relative paths resolved against `data_dir`
    pub fn catalog_path(&self, data_dir: &Path) -> PathBuf {
        match &self.catalog_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => data_dir.join(path),
            None => data_dir.join("terms.json"),
        }
    }
}

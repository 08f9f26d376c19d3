//! Application configuration for the collaborator layers.
//!
//! The pricing engine and the grid sweep never read configuration; these
//! structs are constructed by the caller and handed to the history store,
//! the renderer and the dashboard workflow.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::RenderConfig;
use crate::sweep::config::HeatmapConfig;

/// Environment variable overriding [`StoreConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "SCHOLES_DATA_DIR";

/// Location of the calculation history tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reads `SCHOLES_DATA_DIR`, falling back to the default directory.
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir.trim()),
            _ => Self::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("scholes_data")
}

/// Top-level configuration file layout.
///
/// ```toml
/// [store]
/// data_dir = "scholes_data"
///
/// [heatmap]
/// resolution = 12
///
/// [render]
/// width = 1280
/// height = 640
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub heatmap: HeatmapConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to parse configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
    }
}

// File: ./src/config.rs
// Engine tunables, loaded from TOML with per-field defaults.
use crate::batch::DEFAULT_CHUNK_SIZE;
use crate::context::AppContext;
use crate::model::DEFAULT_EVENT_COLOR;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}
fn default_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}
fn default_channel_capacity() -> usize {
    64
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Events per batch chunk in PROCESS_EVENTS.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Color assigned to events that arrive without one.
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Bound of the request and event channels of the worker.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_true")]
    pub log_to_file: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            default_color: default_color(),
            channel_capacity: default_channel_capacity(),
            log_level: default_log_level(),
            log_to_file: true,
        }
    }
}

impl EngineConfig {
    /// Loads `config.toml` from the context's config directory.
    /// A missing file is not an error: defaults are returned.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: EngineConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&path, toml_str)
            .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
        Ok(())
    }
}

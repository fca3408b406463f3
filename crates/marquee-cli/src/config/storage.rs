//! Config file storage.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use marquee_core::DEFAULT_PAGE_SIZE;

/// Overrides the directory holding `config.json`.
pub const CONFIG_DIR_ENV: &str = "MARQUEE_CONFIG_DIR";

const CONFIG_FILE: &str = "config.json";

/// Persisted settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for StoredConfig {
    fn default() -> Self {
        Self {
            gateway: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let dirs =
        ProjectDirs::from("", "", "marquee").context("Could not determine config directory")?;
    Ok(dirs.config_dir().to_path_buf())
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Load the stored config, or the defaults if none was saved.
pub fn load() -> Result<StoredConfig> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(StoredConfig::default());
    }

    let json = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Save the config to disk.
pub fn save(config: &StoredConfig) -> Result<PathBuf> {
    let path = config_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json).context("Failed to write config file")?;

    Ok(path)
}

/// Remove the stored config. Returns whether a file was removed.
pub fn clear() -> Result<bool> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path).context("Failed to remove config file")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: StoredConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoredConfig::default());
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn unset_gateway_is_not_written() {
        let json = serde_json::to_string(&StoredConfig::default()).unwrap();
        assert_eq!(json, r#"{"page_size":10}"#);
    }
}

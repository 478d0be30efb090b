// SPDX-License-Identifier: MPL-2.0
//! Application configuration: loading and saving user preferences to a
//! `settings.toml` file.

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{clamp_cache_budget_mib, DEFAULT_CACHE_BUDGET_MIB};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "IcedAtelier";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the image-generation backend. Absent means gallery-only.
    pub backend_url: Option<String>,
    /// Local gallery directory used when no backend is configured.
    #[serde(default)]
    pub gallery_dir: Option<String>,
    /// Idle image cache budget in MiB.
    #[serde(default)]
    pub cache_budget_mib: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            gallery_dir: None,
            cache_budget_mib: Some(DEFAULT_CACHE_BUDGET_MIB),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

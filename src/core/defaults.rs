//! User defaults stored in `markswap.json`.
//!
//! Flags passed on the command line win over these for a single invocation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::core::paths;
use crate::replace::ReplaceOptions;
use crate::utils::io;

/// Root configuration structure for markswap.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MarkswapConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Defaults {
    /// Matching toggles used when a flag is not given.
    #[serde(default)]
    pub options: ReplaceOptions,

    /// Write changes back instead of previewing.
    #[serde(default)]
    pub write: bool,
}

/// Load defaults, falling back to built-in values on any problem.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load markswap.json, falling back to defaults if it is missing or invalid.
pub fn load_config() -> MarkswapConfig {
    let Ok(path) = paths::markswap_json() else {
        return MarkswapConfig::default();
    };
    if !path.exists() {
        return MarkswapConfig::default();
    }
    match load_config_from(&path) {
        Ok(config) => config,
        Err(err) => {
            crate::log_status!("config", "Ignoring {}: {}", path.display(), err);
            MarkswapConfig::default()
        }
    }
}

/// Load a config file, reporting read and parse errors.
pub fn load_config_from(path: &Path) -> Result<MarkswapConfig> {
    let content = io::read_file(path, &format!("read {}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
}

/// Save config to markswap.json (creates it if missing).
pub fn save_config(config: &MarkswapConfig) -> Result<()> {
    save_config_to(config, &paths::markswap_json()?)
}

pub fn save_config_to(config: &MarkswapConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        Error::internal_json(e.to_string(), Some("serialize markswap.json".to_string()))
    })?;

    io::write_file_atomic(path, &content, &format!("write {}", path.display()))
}

/// Check if markswap.json exists
pub fn config_exists() -> bool {
    paths::markswap_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Delete markswap.json (reset to defaults). Returns whether a file was removed.
pub fn reset_config() -> Result<bool> {
    let path = paths::markswap_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Path to markswap.json, for display
pub fn config_path() -> Result<String> {
    Ok(paths::markswap_json()?.display().to_string())
}

/// Built-in defaults, ignoring any file config
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}

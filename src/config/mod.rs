// SPDX-License-Identifier: MPL-2.0
//! This module handles the toast manager configuration, including loading and
//! saving preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toast_store::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Keep up to three toasts at once
//! config.toast_limit = Some(3);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.toast_limit, Some(3));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::notifications::{RemoveDelay, ToastLimit};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ToastStore";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub toast_limit: Option<usize>,
    #[serde(default)]
    pub remove_delay_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toast_limit: Some(DEFAULT_TOAST_LIMIT),
            remove_delay_ms: Some(DEFAULT_REMOVE_DELAY_MS),
        }
    }
}

impl Config {
    /// Returns the configured toast limit, clamped to the valid range.
    #[must_use]
    pub fn limit(&self) -> ToastLimit {
        self.toast_limit.map(ToastLimit::new).unwrap_or_default()
    }

    /// Returns the configured remove delay, clamped to the valid range.
    #[must_use]
    pub fn remove_delay(&self) -> RemoveDelay {
        self.remove_delay_ms
            .map(RemoveDelay::from_millis)
            .unwrap_or_default()
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
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!(
                "ignoring invalid config at {}: {}; using defaults",
                path.display(),
                err
            );
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_limits() {
        let config = Config {
            toast_limit: Some(3),
            remove_delay_ms: Some(1200),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.toast_limit, config.toast_limit);
        assert_eq!(loaded.remove_delay_ms, config.remove_delay_ms);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.toast_limit, Some(DEFAULT_TOAST_LIMIT));
        assert_eq!(loaded.remove_delay_ms, Some(DEFAULT_REMOVE_DELAY_MS));
    }

    #[test]
    fn load_from_path_fails_for_missing_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("toast_limit = 2").expect("valid toml");
        assert_eq!(config.toast_limit, Some(2));
        assert!(config.remove_delay_ms.is_none());
        assert_eq!(
            config.remove_delay().as_duration(),
            Duration::from_millis(DEFAULT_REMOVE_DELAY_MS)
        );
    }

    #[test]
    fn limit_and_delay_are_clamped() {
        let config = Config {
            toast_limit: Some(0),
            remove_delay_ms: Some(u64::MAX),
        };
        assert_eq!(config.limit().value(), MIN_TOAST_LIMIT);
        assert_eq!(config.remove_delay().as_millis(), MAX_REMOVE_DELAY_MS);
    }

    #[test]
    fn default_config_keeps_one_toast_for_five_seconds() {
        let config = Config::default();
        assert_eq!(config.toast_limit, Some(1));
        assert_eq!(config.remove_delay_ms, Some(5000));
    }
}

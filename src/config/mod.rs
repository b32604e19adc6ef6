// SPDX-License-Identifier: MPL-2.0
//! This module handles the crate's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use paged_lightbox::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.page_size = Some(48);
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
//! assert_eq!(loaded_config.page_size, Some(48));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::diagnostics::BufferCapacity;
use crate::domain::paging::{CacheCapacity, PageSize};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PagedLightbox";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub page_cache_pages: Option<usize>,
    #[serde(default)]
    pub event_log_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE),
            page_cache_pages: Some(DEFAULT_PAGE_CACHE_PAGES),
            event_log_capacity: Some(DEFAULT_EVENT_LOG_CAPACITY),
        }
    }
}

impl Config {
    /// Page size with out-of-range values clamped.
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size.map(PageSize::new).unwrap_or_default()
    }

    /// Page cache capacity with out-of-range values clamped.
    #[must_use]
    pub fn page_cache_capacity(&self) -> CacheCapacity {
        self.page_cache_pages
            .map(CacheCapacity::new)
            .unwrap_or_default()
    }

    /// Event log capacity with out-of-range values clamped.
    #[must_use]
    pub fn event_log_capacity(&self) -> BufferCapacity {
        self.event_log_capacity
            .map(BufferCapacity::new)
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

/// Loads the configuration from the platform config directory.
///
/// Returns the default configuration when no settings file exists yet.
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be read.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Saves the configuration to the platform config directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialized.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file, falling back to defaults on malformed TOML.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

/// Writes a configuration file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
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
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_page_size() {
        let config = Config {
            page_size: Some(48),
            page_cache_pages: Some(2),
            event_log_capacity: Some(64),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_path_errors_when_file_is_missing() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("missing.toml");

        assert!(load_from_path(&config_path).is_err());
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "page_size = 12\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.page_size, Some(12));
        assert!(loaded.page_cache_pages.is_none());
        assert_eq!(loaded.page_cache_capacity(), CacheCapacity::default());
    }

    #[test]
    fn accessors_clamp_out_of_range_values() {
        let config = Config {
            page_size: Some(0),
            page_cache_pages: Some(10_000),
            event_log_capacity: Some(1),
        };

        assert_eq!(config.page_size().value(), MIN_PAGE_SIZE);
        assert_eq!(config.page_cache_capacity().value(), MAX_PAGE_CACHE_PAGES);
        assert_eq!(config.event_log_capacity().value(), MIN_EVENT_LOG_CAPACITY);
    }

    #[test]
    fn default_config_uses_default_constants() {
        let config = Config::default();
        assert_eq!(config.page_size().value(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.page_cache_capacity().value(), DEFAULT_PAGE_CACHE_PAGES);
        assert_eq!(config.event_log_capacity().value(), DEFAULT_EVENT_LOG_CAPACITY);
    }
}

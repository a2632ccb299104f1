// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[editor]` - Editing behavior (aspect lock)
//! - `[export]` - Output resolution and destination directory
//! - `[storage]` - Local storage quota
//! - `[share]` - Preset share title and text
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PFP_EDITOR_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use pfp_editor::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Editing behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Keep the hat square while resizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_aspect: Option<bool>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            lock_aspect: Some(false),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// Side length of the exported PNG.
    #[serde(default = "default_output_size", skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u32>,

    /// Directory receiving exported files. Defaults to the download directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_size: default_output_size(),
            directory: None,
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Byte quota of the local key-value store.
    #[serde(default = "default_quota", skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            quota_bytes: default_quota(),
        }
    }
}

/// Share settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShareConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub share: ShareConfig,
}

impl Config {
    /// Export side length, clamped to the supported range.
    #[must_use]
    pub fn output_size(&self) -> u32 {
        self.export
            .output_size
            .unwrap_or(DEFAULT_OUTPUT_SIZE)
            .clamp(MIN_OUTPUT_SIZE, MAX_OUTPUT_SIZE)
    }

    #[must_use]
    pub fn lock_aspect(&self) -> bool {
        self.editor.lock_aspect.unwrap_or(false)
    }

    #[must_use]
    pub fn storage_quota(&self) -> usize {
        self.storage
            .quota_bytes
            .unwrap_or(DEFAULT_STORAGE_QUOTA_BYTES)
    }

    #[must_use]
    pub fn share_title(&self) -> &str {
        self.share.title.as_deref().unwrap_or(DEFAULT_SHARE_TITLE)
    }

    #[must_use]
    pub fn share_text(&self) -> &str {
        self.share.text.as_deref().unwrap_or(DEFAULT_SHARE_TEXT)
    }

    /// Directory receiving exports: configured, then the platform download dir.
    #[must_use]
    pub fn export_directory(&self) -> Option<PathBuf> {
        self.export.directory.clone().or_else(dirs::download_dir)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_output_size() -> Option<u32> {
    Some(DEFAULT_OUTPUT_SIZE)
}

fn default_quota() -> Option<usize> {
    Some(DEFAULT_STORAGE_QUOTA_BYTES)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(_) => {
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

//! Configuration management for the application.
//!
//! This module handles loading and saving application configuration in TOML
//! format with platform-specific directory resolution. The configuration only
//! says *where* things live; the NumLock preference itself goes through the
//! config store in [`crate::store`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{
    CONFIG_DIR_ENV, DEFAULT_KEYMAPS_DIR, DEFAULT_KEYMAP_TOOL, DEFAULT_STATUS_FILE, STORE_DOMAIN,
};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for the external keymap resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// JSON status document exposing the active keymap
    #[serde(default = "default_status_file")]
    pub status_file: PathBuf,
    /// Directory holding `<name>.json` keymap files
    #[serde(default = "default_keymaps_dir")]
    pub keymaps_dir: PathBuf,
    /// Helper invoked with the chosen keymap name
    #[serde(default = "default_keymap_tool")]
    pub keymap_tool: PathBuf,
    /// Directory of the config store (defaults to the config directory)
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
}

fn default_status_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATUS_FILE)
}

fn default_keymaps_dir() -> PathBuf {
    PathBuf::from(DEFAULT_KEYMAPS_DIR)
}

fn default_keymap_tool() -> PathBuf {
    PathBuf::from(DEFAULT_KEYMAP_TOOL)
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            status_file: default_status_file(),
            keymaps_dir: default_keymaps_dir(),
            keymap_tool: default_keymap_tool(),
            store_dir: None,
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Resource locations
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/KeyboardSettings/`
    /// - macOS: `~/Library/Application Support/KeyboardSettings/`
    /// - Windows: `%APPDATA%\KeyboardSettings\`
    ///
    /// `KEYBOARD_SETTINGS_CONFIG_DIR` takes precedence when set.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(STORE_DOMAIN);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolves where the config store keeps its files.
    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.paths.store_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::config_dir(),
        }
    }

    /// Loads configuration from the default location, or defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file, or defaults when absent.
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to a specific file using temp file + atomic rename.
    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }
}

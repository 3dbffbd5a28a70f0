//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application
//! configuration in TOML format with platform-specific directory
//! resolution. Every field has a default so a missing or partial file
//! works.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{APP_NAME, DEFAULT_PROFILE_NAME, KARABINER_CONFIG_RELATIVE};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Override for the Karabiner configuration file location.
    pub karabiner_config: Option<PathBuf>,
}

impl PathConfig {
    /// The effective output path: the override if set, otherwise the
    /// engine's well-known location under the home directory.
    pub fn karabiner_config_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.karabiner_config {
            return Ok(path.clone());
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(KARABINER_CONFIG_RELATIVE))
    }
}

/// Profile settings written into the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Profile name as shown in the Karabiner UI.
    pub name: String,
    /// Passed through to the engine's global settings.
    pub show_in_menu_bar: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            show_in_menu_bar: false,
        }
    }
}

/// Output behavior when writing the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Keep a timestamped backup of an existing target before overwriting.
    pub backup: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { backup: true }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File system locations.
    pub paths: PathConfig,
    /// Generated profile settings.
    pub profile: ProfileConfig,
    /// Output behavior.
    pub output: OutputConfig,
}

impl Config {
    /// Gets the configuration directory path.
    ///
    /// - Linux: `~/.config/Hyperlayer/`
    /// - macOS: `~/Library/Application Support/Hyperlayer/`
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join(APP_NAME))
    }

    /// Gets the configuration file path.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads the configuration, falling back to defaults if no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_file()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Saves the configuration, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.profile.name, "Default");
        assert!(!config.profile.show_in_menu_bar);
        assert!(config.output.backup);
        assert_eq!(config.paths.karabiner_config, None);
    }

    #[test]
    fn test_empty_toml_parses_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml_fills_missing_sections() {
        let config: Config = toml::from_str(
            r#"
            [profile]
            name = "Work"
            "#,
        )
        .unwrap();
        assert_eq!(config.profile.name, "Work");
        assert!(!config.profile.show_in_menu_bar);
        assert!(config.output.backup);
    }

    #[test]
    fn test_round_trip() {
        let mut config = Config::default();
        config.paths.karabiner_config = Some(PathBuf::from("/tmp/karabiner.json"));
        config.profile.name = "Laptop".to_string();
        config.output.backup = false;

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_explicit_path_override_wins() {
        let paths = PathConfig {
            karabiner_config: Some(PathBuf::from("/tmp/out.json")),
        };
        assert_eq!(
            paths.karabiner_config_path().unwrap(),
            PathBuf::from("/tmp/out.json")
        );
    }
}

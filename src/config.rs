//! Configuration module for nametag
//!
//! Persists the working directory, view mode, and the known-tag list between
//! sessions. Configuration lives as TOML in the user's config directory.
//! The tag list is only the registry's serialized name list: tag↔image
//! associations are never restored from here, always rebuilt by rescanning
//! the encoded filenames.

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::view::ViewMode;

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NametagConfig {
    /// Directory the view was last pointed at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// View mode to restore on startup
    #[serde(default)]
    pub view_mode: ViewMode,

    /// `@`-delimited list of known tag names (registry serialization)
    #[serde(default)]
    pub tag_list: String,
}

impl NametagConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("nametag").join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// A missing file silently yields the defaults; nothing is written until
    /// the first save.
    ///
    /// # Errors
    /// Returns `ConfigError` if an existing file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    ///
    /// # Errors
    /// Returns `ConfigError` if an existing file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    /// Returns `ConfigError` if the config directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    ///
    /// # Errors
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::temp_dir;

    #[test]
    fn missing_file_yields_defaults_silently() {
        let dir = temp_dir();
        let config = NametagConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert!(config.directory.is_none());
        assert_eq!(config.view_mode, ViewMode::Tree);
        assert!(config.tag_list.is_empty());
        assert!(!dir.path().join("config.toml").exists());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = temp_dir();
        let path = dir.path().join("nested").join("config.toml");

        let config = NametagConfig {
            directory: Some(PathBuf::from("/pictures")),
            view_mode: ViewMode::Recursive,
            tag_list: "@Red@Blue".to_string(),
        };
        config.save_to(&path).unwrap();

        let loaded = NametagConfig::load_from(&path).unwrap();
        assert_eq!(loaded.directory, Some(PathBuf::from("/pictures")));
        assert_eq!(loaded.view_mode, ViewMode::Recursive);
        assert_eq!(loaded.tag_list, "@Red@Blue");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = temp_dir();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tag_list = \"@Red\"\n").unwrap();

        let loaded = NametagConfig::load_from(&path).unwrap();
        assert!(loaded.directory.is_none());
        assert_eq!(loaded.view_mode, ViewMode::Tree);
        assert_eq!(loaded.tag_list, "@Red");
    }
}

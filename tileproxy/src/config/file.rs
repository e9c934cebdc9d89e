//! Configuration file handling for ~/.tileproxy/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;
use crate::coord::BoundingBox;
use crate::grid::{GridError, GridSpec, ResolutionLadder};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Grid settings are individually valid but do not form a gridset
    #[error("Invalid grid configuration: {0}")]
    Grid(#[from] GridError),

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.tileproxy/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.tileproxy/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
        }
        Ok(path)
    }

    /// Builds the gridset described by the `[grid]` section.
    pub fn grid_spec(&self) -> Result<GridSpec, ConfigFileError> {
        let [west, south, east, north] = self.grid.extent;
        let ladder = ResolutionLadder::new(self.grid.resolutions.clone())?;
        Ok(GridSpec::new(
            BoundingBox::new(west, south, east, north),
            ladder,
            self.grid.cell_size,
        )?)
    }
}

/// Get the path to the config directory (~/.tileproxy).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tileproxy")
}

/// Get the path to the config file (~/.tileproxy/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::DEFAULT_LAYER;
    use crate::provider::DEFAULT_TIMEOUT_SECS;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.upstream.default_layer, DEFAULT_LAYER);
        assert_eq!(config.upstream.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.grid.cell_size, 512);
        assert!(config.logging.file.ends_with(".tileproxy/tileproxy.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_then_load_preserves_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.upstream.timeout = 7;
        config.upstream.default_layer = "aerial2016".to_string();
        config.grid.resolutions = vec![8.0, 4.0, 2.0];
        config.logging.file = temp_dir.path().join("proxy.log");
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_value_reports_location() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, "[grid]\ncell_size = huge\n").unwrap();

        let err = ConfigFile::load_from(&config_path).unwrap_err();
        assert!(err.to_string().contains("grid.cell_size"));
    }

    #[test]
    fn test_default_grid_spec_matches_builtin() {
        let grid = ConfigFile::default().grid_spec().unwrap();
        assert_eq!(grid, GridSpec::default());
    }

    #[test]
    fn test_grid_spec_from_custom_settings() {
        let mut config = ConfigFile::default();
        config.grid.extent = [0.0, 0.0, 1000.0, 1000.0];
        config.grid.resolutions = vec![2.0, 1.0];
        config.grid.cell_size = 100;

        let grid = config.grid_spec().unwrap();
        assert_eq!(grid.cell_size(), 100);
        assert_eq!(grid.ladder().finest(), 1.0);
    }
}

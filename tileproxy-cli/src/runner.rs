//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, service creation,
//! and file output so command handlers stay small.

use crate::error::CliError;
use std::path::{Path, PathBuf};
use tileproxy::config::{config_file_path, ConfigFile};
use tileproxy::logging::{init_logging, LoggingGuard};
use tileproxy::provider::{AsyncReqwestClient, WmsSource};
use tileproxy::service::TileService;
use tracing::info;

/// Service type produced by the runner.
pub type WmsTileService = TileService<WmsSource<AsyncReqwestClient>>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    config: ConfigFile,
    config_path: PathBuf,
}

impl CliRunner {
    /// Load the config file and initialize logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file, or `None` for `~/.tileproxy/config.ini`
    /// * `debug` - When true, defaults to debug-level logging if RUST_LOG is unset
    pub fn new(config_path: Option<PathBuf>, debug: bool) -> Result<Self, CliError> {
        let config_path = config_path.unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let logging_guard = init_logging(&config.logging.file, debug)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("tileproxy v{}", tileproxy::VERSION);
        info!(config = %self.config_path.display(), "tileproxy CLI: {} command", command);
    }

    /// Create a tile service for the configured upstream.
    pub fn create_service(&self) -> Result<WmsTileService, CliError> {
        TileService::from_config(&self.config)
            .map_err(CliError::ServiceCreation)
            .inspect(|_| info!("Service created successfully"))
    }

    /// Build the multi-threaded runtime the service runs on.
    pub fn build_runtime(&self) -> Result<tokio::runtime::Runtime, CliError> {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)
    }

    /// Save encoded tile data to a file.
    pub fn save_tile(&self, path: &Path, data: &[u8]) -> Result<(), CliError> {
        write_output(path, data)?;
        info!(path = %path.display(), bytes = data.len(), "Tile saved");
        println!("Saved {} ({} bytes)", path.display(), data.len());
        Ok(())
    }
}

/// Write `data` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, data: &[u8]) -> Result<(), CliError> {
    let to_error = |error| CliError::FileWrite {
        path: path.to_path_buf(),
        error,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(to_error)?;
        }
    }
    std::fs::write(path, data).map_err(to_error)
}

//! Default values and constants for all configuration settings.

use super::file::config_directory;
use super::settings::*;
use crate::grid::defaults::{DEFAULT_CELL_SIZE, DEFAULT_EXTENT, DEFAULT_PROJ, DEFAULT_RESOLUTIONS};
use crate::provider::{DEFAULT_FORMAT, DEFAULT_SRS, DEFAULT_TIMEOUT_SECS, DEFAULT_WMS_URL};

/// Layer requested when the caller does not name one.
pub const DEFAULT_LAYER: &str = "basemap";

/// Log file name inside the config directory.
pub const DEFAULT_LOG_FILE_NAME: &str = "tileproxy.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            upstream: UpstreamSettings::default(),
            grid: GridSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_WMS_URL.to_string(),
            srs: DEFAULT_SRS.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            default_layer: DEFAULT_LAYER.to_string(),
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            extent: DEFAULT_EXTENT,
            resolutions: DEFAULT_RESOLUTIONS.to_vec(),
            cell_size: DEFAULT_CELL_SIZE,
            proj: DEFAULT_PROJ.to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: config_directory().join(DEFAULT_LOG_FILE_NAME),
        }
    }
}

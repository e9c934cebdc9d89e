//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Upstream WMS settings
    pub upstream: UpstreamSettings,
    /// Source gridset settings
    pub grid: GridSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Upstream raster service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamSettings {
    /// WMS endpoint base URL
    pub url: String,
    /// SRS code sent with GetMap requests
    pub srs: String,
    /// Image MIME type requested
    pub format: String,
    /// Timeout in seconds for each source cell request
    pub timeout: u64,
    /// Layer used when a request names none
    pub default_layer: String,
}

/// Source gridset configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    /// Grid extent as west, south, east, north in source CRS units
    pub extent: [f64; 4],
    /// Native resolutions, coarsest first
    pub resolutions: Vec<f64>,
    /// Cell edge in source pixels
    pub cell_size: u32,
    /// proj string of the source CRS
    pub proj: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

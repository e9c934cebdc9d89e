//! User configuration loaded from `~/.tileproxy/config.ini`.
//!
//! ```ini
//! [upstream]
//! url = http://maps1.nyc.gov/geowebcache/service/wms/
//! timeout = 30
//! default_layer = basemap
//!
//! [grid]
//! cell_size = 512
//! ```
//!
//! Any key left out falls back to the built-in NYC gridset defaults.

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{DEFAULT_LAYER, DEFAULT_LOG_FILE_NAME};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, GridSettings, LoggingSettings, UpstreamSettings};

//! tileproxy - Web Mercator tiles from a state-plane WMS gridset
//!
//! Web map clients ask for 256×256 tiles by `(x, y, zoom)` in Web Mercator.
//! The upstream imagery lives on a WMS gridset in a different projection
//! (New York State Plane Long Island, US feet) with its own coarser
//! resolution ladder. This library reprojects each request, fetches the 1, 2
//! or 4 source cells that cover it, stitches them and resamples the result.
//!
//! # High-Level API
//!
//! ```ignore
//! use tileproxy::config::ConfigFile;
//! use tileproxy::service::TileService;
//!
//! let service = TileService::from_config(&ConfigFile::load()?)?;
//! let tile = service.get_tile("basemap", 1205, 1539, 12).await?;
//! ```

pub mod config;
pub mod coord;
pub mod coverage;
pub mod grid;
pub mod logging;
pub mod pipeline;
pub mod projection;
pub mod provider;
pub mod service;

/// Version of the tileproxy library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

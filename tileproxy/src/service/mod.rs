//! High-level service facade.
//!
//! [`TileService`] owns the immutable process-wide state (gridset,
//! reprojector, raster source) and runs one tile request through the
//! pipeline:
//!
//! ```text
//! (x, y, z) → footprint → reproject → resolution → coverage plan
//!           → fetch → compose → crop/resample → PNG
//! ```

mod config;
mod error;
mod facade;

pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::ServiceError;
pub use facade::{TilePlan, TileService};

//! Async tile generation pipeline.
//!
//! ```text
//! CoveragePlan → Fetch Stage → Compose Stage → Crop Stage → OutputTile
//! ```
//!
//! The fetch stage does network I/O on the async runtime. Compose and crop are
//! CPU-bound and run through a [`BlockingExecutor`] so they never stall the
//! runtime's worker threads.

mod error;
mod executor;
pub mod stages;

pub use error::TileError;
pub use executor::{BlockingExecutor, ExecutorError, TokioExecutor};

#[cfg(test)]
pub use executor::SyncExecutor;

pub use stages::{CompositeRaster, CropWindow, FetchedCells, OutputTile, OUTPUT_TILE_SIZE};

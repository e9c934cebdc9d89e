//! CLI command implementations.
//!
//! - [`init`] - Write a default configuration file
//! - [`plan`] - Show how a tile maps onto the source grid
//! - [`tile`] - Render a single tile to a PNG file

pub mod init;
pub mod plan;
pub mod tile;

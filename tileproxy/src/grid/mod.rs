//! Source gridset geometry.
//!
//! The upstream service only serves imagery in square cells aligned to a fixed
//! origin, at a handful of native resolutions. This module snaps state-plane
//! points to those cells.
//!
//! Cells are enumerated with columns growing east from the grid's west edge
//! and rows growing south from its north edge. A cell covers
//! `[xmin, xmax) × [ymin, ymax)`, so a point sitting exactly on a boundary
//! belongs to the cell for which that boundary is the minimum edge.

pub mod defaults;
mod ladder;

pub use ladder::ResolutionLadder;

use crate::coord::{BoundingBox, StatePlane};
use thiserror::Error;

/// Errors raised while building or querying the gridset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("resolution ladder is empty")]
    EmptyLadder,

    #[error("invalid resolution {0}: must be finite and positive")]
    InvalidResolution(f64),

    #[error("resolutions must be strictly descending ({previous} followed by {next})")]
    NotDescending { previous: f64, next: f64 },

    #[error("invalid grid extent: {0}")]
    InvalidExtent(String),

    #[error("cell size must be positive")]
    InvalidCellSize,

    #[error("point ({x:.3}, {y:.3}) lies outside the source grid extent")]
    OutsideGrid { x: f64, y: f64 },
}

/// One cell of the source grid at a particular resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Column index, 0 at the grid's west edge
    pub col: i64,
    /// Row index, 0 at the grid's north edge
    pub row: i64,
    /// Resolution (feet per pixel) this cell belongs to
    pub resolution: f64,
    /// Cell footprint in state-plane feet
    pub bounds: BoundingBox<StatePlane>,
}

impl GridCell {
    /// True when both cells are the same grid position at the same level.
    pub fn same_cell(&self, other: &GridCell) -> bool {
        self.col == other.col && self.row == other.row && self.resolution == other.resolution
    }

    pub fn xmin(&self) -> f64 {
        self.bounds.west
    }

    pub fn ymin(&self) -> f64 {
        self.bounds.south
    }

    pub fn xmax(&self) -> f64 {
        self.bounds.east
    }

    pub fn ymax(&self) -> f64 {
        self.bounds.north
    }
}

/// Immutable description of the upstream gridset.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    extent: BoundingBox<StatePlane>,
    ladder: ResolutionLadder,
    cell_size: u32,
}

impl GridSpec {
    pub fn new(
        extent: BoundingBox<StatePlane>,
        ladder: ResolutionLadder,
        cell_size: u32,
    ) -> Result<Self, GridError> {
        if !(extent.west < extent.east && extent.south < extent.north) {
            return Err(GridError::InvalidExtent(extent.to_string()));
        }
        if cell_size == 0 {
            return Err(GridError::InvalidCellSize);
        }
        Ok(Self {
            extent,
            ladder,
            cell_size,
        })
    }

    pub fn extent(&self) -> &BoundingBox<StatePlane> {
        &self.extent
    }

    pub fn ladder(&self) -> &ResolutionLadder {
        &self.ladder
    }

    /// Cell edge length in source pixels.
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Cell edge length in state-plane feet at `resolution`.
    #[inline]
    pub fn cell_span(&self, resolution: f64) -> f64 {
        resolution * self.cell_size as f64
    }

    /// Snaps a state-plane point to the grid cell containing it.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutsideGrid`] when the point is outside the
    /// gridset extent.
    pub fn cell_bounds(&self, x: f64, y: f64, resolution: f64) -> Result<GridCell, GridError> {
        let extent = &self.extent;
        if !(x >= extent.west && x < extent.east && y >= extent.south && y < extent.north) {
            return Err(GridError::OutsideGrid { x, y });
        }

        let span = self.cell_span(resolution);
        let col = ((x - extent.west) / span).floor();
        // Rows count downward; ceil - 1 leaves a point on a row boundary in the
        // northern cell, whose minimum edge it is.
        let row = ((extent.north - y) / span).ceil() - 1.0;

        let xmin = extent.west + col * span;
        let ymax = extent.north - row * span;

        Ok(GridCell {
            col: col as i64,
            row: row as i64,
            resolution,
            bounds: BoundingBox::new(xmin, ymax - span, xmin + span, ymax),
        })
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        let [west, south, east, north] = defaults::DEFAULT_EXTENT;
        Self {
            extent: BoundingBox::new(west, south, east, north),
            ladder: ResolutionLadder::default(),
            cell_size: defaults::DEFAULT_CELL_SIZE,
        }
    }
}

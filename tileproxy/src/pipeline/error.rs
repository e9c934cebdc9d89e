//! Error types for the tile pipeline.
//!
//! Errors are categorized by the stage that raised them so callers can tell
//! upstream trouble (worth a retry later) from defects in the geometry.

use thiserror::Error;

use crate::coverage::Quadrant;
use crate::grid::GridError;
use crate::projection::ProjectionError;

/// Errors that can occur while producing one output tile.
///
/// No variant is ever turned into placeholder imagery: a failed request
/// returns no tile at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    /// Tile coordinate outside the web tile scheme
    #[error("invalid tile coordinate x={x} y={y} zoom={zoom}")]
    InvalidTileCoordinate { x: u32, y: u32, zoom: u8 },

    /// Footprint corner outside the source grid extent
    #[error("point ({x:.3}, {y:.3}) lies outside the source grid")]
    OutsideGrid { x: f64, y: f64 },

    /// Coordinate transform failed
    #[error("projection failed: {0}")]
    Projection(String),

    /// A source cell could not be fetched
    #[error("upstream fetch failed for {quadrant} cell: {message}")]
    UpstreamFetch { quadrant: Quadrant, message: String },

    /// Fetched images could not be stitched together
    #[error("composition failed: {0}")]
    Composition(String),

    /// Crop rectangle does not fit the composite raster
    #[error(
        "crop window x={x:.2} y={y:.2} extent={extent:.2} exceeds composite {width}x{height}"
    )]
    CropOutOfBounds {
        x: f64,
        y: f64,
        extent: f64,
        width: u32,
        height: u32,
    },

    /// Output encoding failed
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Request was cancelled before the tile was produced
    #[error("tile request cancelled")]
    Cancelled,

    /// Internal error (e.g., a blocking task panicked)
    #[error("internal error: {0}")]
    Internal(String),
}

impl TileError {
    /// True for errors that indicate a bug in the geometry rather than a
    /// problem with the request or the upstream service.
    pub fn is_defect(&self) -> bool {
        matches!(self, TileError::CropOutOfBounds { .. })
    }

    /// True for errors raised by the upstream service.
    pub fn is_upstream(&self) -> bool {
        matches!(self, TileError::UpstreamFetch { .. })
    }
}

impl From<ProjectionError> for TileError {
    fn from(err: ProjectionError) -> Self {
        TileError::Projection(err.to_string())
    }
}

impl From<GridError> for TileError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutsideGrid { x, y } => TileError::OutsideGrid { x, y },
            other => TileError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_crop_errors_are_defects() {
        let crop = TileError::CropOutOfBounds {
            x: -3.0,
            y: 0.0,
            extent: 100.0,
            width: 512,
            height: 512,
        };
        assert!(crop.is_defect());

        let upstream = TileError::UpstreamFetch {
            quadrant: Quadrant::Ne,
            message: "HTTP 500".to_string(),
        };
        assert!(!upstream.is_defect());
        assert!(upstream.is_upstream());
        assert!(!TileError::Encoding("x".to_string()).is_defect());
    }

    #[test]
    fn test_upstream_display_names_quadrant() {
        let err = TileError::UpstreamFetch {
            quadrant: Quadrant::Sw,
            message: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "upstream fetch failed for sw cell: connection refused"
        );
    }

    #[test]
    fn test_outside_grid_converts() {
        let err: TileError = GridError::OutsideGrid { x: 1.0, y: 2.0 }.into();
        assert_eq!(err, TileError::OutsideGrid { x: 1.0, y: 2.0 });
    }

    #[test]
    fn test_projection_error_converts() {
        let err: TileError = ProjectionError::TransformFailed {
            x: 0.0,
            y: 0.0,
            reason: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, TileError::Projection(msg) if msg.contains("boom")));
    }
}

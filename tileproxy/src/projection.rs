//! Web Mercator → state-plane reprojection.
//!
//! Mercator metres are unprojected to geographic coordinates with closed-form
//! math, then projected into the source CRS with proj4rs (pure Rust, no PROJ
//! system library).

use proj4rs::proj::Proj;
use proj4rs::transform::transform;
use thiserror::Error;

use crate::coord::{mercator_to_lon_lat, BoundingBox, StatePlane, WebMercator};

/// Geographic CRS the Mercator footprint is unprojected into.
const WGS84_LONGLAT: &str = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";

/// Errors raised by the coordinate transformer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid projection definition '{definition}': {reason}")]
    InvalidDefinition { definition: String, reason: String },

    #[error("transform of ({x}, {y}) failed: {reason}")]
    TransformFailed { x: f64, y: f64, reason: String },
}

/// Forward transformer from Web Mercator into the source state-plane CRS.
///
/// Built once at startup and shared read-only between requests.
pub struct Reprojector {
    geographic: Proj,
    target: Proj,
    target_definition: String,
}

impl Reprojector {
    /// Creates a transformer targeting the CRS described by `proj_string`.
    pub fn new(proj_string: &str) -> Result<Self, ProjectionError> {
        let geographic = Proj::from_proj_string(WGS84_LONGLAT).map_err(|e| {
            ProjectionError::InvalidDefinition {
                definition: WGS84_LONGLAT.to_string(),
                reason: format!("{:?}", e),
            }
        })?;
        let target =
            Proj::from_proj_string(proj_string).map_err(|e| ProjectionError::InvalidDefinition {
                definition: proj_string.to_string(),
                reason: format!("{:?}", e),
            })?;

        Ok(Self {
            geographic,
            target,
            target_definition: proj_string.to_string(),
        })
    }

    /// The proj string of the target CRS.
    pub fn target_definition(&self) -> &str {
        &self.target_definition
    }

    /// Projects one Web Mercator point into the target CRS.
    pub fn project_point(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let (lon, lat) = mercator_to_lon_lat(x, y);

        // proj4rs expects geographic input in radians
        let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
        transform(&self.geographic, &self.target, &mut point).map_err(|e| {
            ProjectionError::TransformFailed {
                x,
                y,
                reason: format!("{:?}", e),
            }
        })?;

        if !point.0.is_finite() || !point.1.is_finite() {
            return Err(ProjectionError::TransformFailed {
                x,
                y,
                reason: "non-finite result".to_string(),
            });
        }

        Ok((point.0, point.1))
    }

    /// Reprojects a footprint by transforming its two diagonal corners.
    ///
    /// The west/south and east/north corners are projected independently, which
    /// holds while the footprint stays clear of poles and the antimeridian.
    pub fn reproject(
        &self,
        bbox: &BoundingBox<WebMercator>,
    ) -> Result<BoundingBox<StatePlane>, ProjectionError> {
        let (west, south) = self.project_point(bbox.west, bbox.south)?;
        let (east, north) = self.project_point(bbox.east, bbox.north)?;
        Ok(BoundingBox::new(west, south, east, north))
    }
}

impl std::fmt::Debug for Reprojector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reprojector")
            .field("target", &self.target_definition)
            .finish()
    }
}

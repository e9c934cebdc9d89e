//! Coordinate type definitions

use std::fmt;
use std::marker::PhantomData;

/// Half the earth's circumference in Web Mercator metres.
pub const HALF_EARTH: f64 = 20_037_508.342_789_244;

/// Largest zoom level whose tile count still fits in a `u32`.
pub const MAX_ZOOM: u8 = 30;

/// Tile coordinates in the standard Web Mercator / slippy map scheme.
///
/// `x` grows eastward from the antimeridian, `y` grows southward from the
/// top of the Mercator square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileCoordinate {
    /// Creates a tile coordinate, validating it against its zoom level.
    pub fn new(x: u32, y: u32, zoom: u8) -> Result<Self, CoordError> {
        let coord = Self { x, y, zoom };
        coord.validate()?;
        Ok(coord)
    }

    /// Number of tiles along one axis at this zoom level.
    #[inline]
    pub fn tiles_per_axis(zoom: u8) -> u64 {
        1u64 << zoom
    }

    /// Checks that zoom, x and y are inside the valid range.
    pub fn validate(&self) -> Result<(), CoordError> {
        if self.zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(self.zoom));
        }
        let n = Self::tiles_per_axis(self.zoom);
        if u64::from(self.x) >= n || u64::from(self.y) >= n {
            return Err(CoordError::OutOfRange {
                x: self.x,
                y: self.y,
                zoom: self.zoom,
            });
        }
        Ok(())
    }
}

impl fmt::Display for TileCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// A coordinate reference system marker.
///
/// Bounding boxes carry their CRS in the type so that Web Mercator metres
/// can never be handed to code expecting state-plane feet.
pub trait Crs: Copy + fmt::Debug + Send + Sync + 'static {
    /// Short identifier used in logs.
    const NAME: &'static str;
}

/// Web Mercator (EPSG:3857), metres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebMercator;

impl Crs for WebMercator {
    const NAME: &'static str = "EPSG:3857";
}

/// The upstream service's state-plane grid, US survey feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatePlane;

impl Crs for StatePlane {
    const NAME: &'static str = "state-plane";
}

/// Axis-aligned bounding box ordered (west, south, east, north).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<C: Crs> {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    crs: PhantomData<C>,
}

impl<C: Crs> BoundingBox<C> {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
            crs: PhantomData,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox<C>) -> bool {
        other.west >= self.west
            && other.east <= self.east
            && other.south >= self.south
            && other.north <= self.north
    }

    /// The CRS identifier this box is expressed in.
    pub fn crs_name(&self) -> &'static str {
        C::NAME
    }
}

impl<C: Crs> fmt::Display for BoundingBox<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}, {:.3}, {:.3}] ({})",
            self.west,
            self.south,
            self.east,
            self.north,
            C::NAME
        )
    }
}

/// Errors that can occur while validating tile coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    /// Zoom level is above [`MAX_ZOOM`]
    InvalidZoom(u8),
    /// x or y is not in `[0, 2^zoom)`
    OutOfRange { x: u32, y: u32, zoom: u8 },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between 0 and {})",
                    zoom, MAX_ZOOM
                )
            }
            CoordError::OutOfRange { x, y, zoom } => {
                write!(
                    f,
                    "Tile ({}, {}) is outside the valid range for zoom {} (0..{})",
                    x,
                    y,
                    zoom,
                    TileCoordinate::tiles_per_axis(*zoom)
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}

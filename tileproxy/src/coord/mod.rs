//! Coordinate conversion module
//!
//! Provides the Web Mercator tile scheme used by web map clients: tile
//! footprints in projected metres and the inverse Mercator math needed to hand
//! those footprints to the state-plane projection.

mod types;

#[cfg(test)]
mod tests;

pub use types::{
    BoundingBox, CoordError, Crs, StatePlane, TileCoordinate, WebMercator, HALF_EARTH, MAX_ZOOM,
};

use std::f64::consts::PI;

/// Returns the Web Mercator footprint of a tile.
///
/// The footprint is a square in EPSG:3857 metres; tile (0, 0) is the
/// north-west corner of the Mercator square.
///
/// # Errors
///
/// Returns [`CoordError`] if zoom, x or y are outside the valid range.
pub fn tile_footprint(coord: &TileCoordinate) -> Result<BoundingBox<WebMercator>, CoordError> {
    coord.validate()?;

    let n = TileCoordinate::tiles_per_axis(coord.zoom) as f64;
    let tile_size = 2.0 * HALF_EARTH / n;

    let west = -HALF_EARTH + coord.x as f64 * tile_size;
    let north = HALF_EARTH - coord.y as f64 * tile_size;

    Ok(BoundingBox::new(
        west,
        north - tile_size,
        west + tile_size,
        north,
    ))
}

/// Converts Web Mercator metres to longitude/latitude in degrees.
#[inline]
pub fn mercator_to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = x * 180.0 / HALF_EARTH;
    let y_rad = y * PI / HALF_EARTH;
    let lat = (2.0 * y_rad.exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

/// Converts longitude/latitude in degrees to Web Mercator metres.
#[inline]
pub fn lon_lat_to_mercator(lon: f64, lat: f64) -> (f64, f64) {
    let x = lon * HALF_EARTH / 180.0;
    let y = (PI / 4.0 + lat.to_radians() / 2.0).tan().ln() * HALF_EARTH / PI;
    (x, y)
}

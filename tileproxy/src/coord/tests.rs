//! Tests for tile footprints and Mercator conversion

use super::*;
use proptest::prelude::*;

const EPS: f64 = 1e-6;

#[test]
fn test_zoom_zero_covers_whole_world() {
    let tile = TileCoordinate::new(0, 0, 0).unwrap();
    let bbox = tile_footprint(&tile).unwrap();

    assert!((bbox.west + HALF_EARTH).abs() < EPS);
    assert!((bbox.south + HALF_EARTH).abs() < EPS);
    assert!((bbox.east - HALF_EARTH).abs() < EPS);
    assert!((bbox.north - HALF_EARTH).abs() < EPS);
}

#[test]
fn test_zoom_one_north_west_quadrant() {
    let tile = TileCoordinate::new(0, 0, 1).unwrap();
    let bbox = tile_footprint(&tile).unwrap();

    assert!((bbox.west + HALF_EARTH).abs() < EPS);
    assert!(bbox.south.abs() < EPS);
    assert!(bbox.east.abs() < EPS);
    assert!((bbox.north - HALF_EARTH).abs() < EPS);
}

#[test]
fn test_new_york_tile_at_zoom_12() {
    // Lower Manhattan / Brooklyn
    let tile = TileCoordinate::new(1205, 1539, 12).unwrap();
    let bbox = tile_footprint(&tile).unwrap();

    let (west_lon, south_lat) = mercator_to_lon_lat(bbox.west, bbox.south);
    let (east_lon, north_lat) = mercator_to_lon_lat(bbox.east, bbox.north);

    assert!((west_lon - (-74.0918)).abs() < 0.001);
    assert!((east_lon - (-74.0039)).abs() < 0.001);
    assert!((south_lat - 40.7140).abs() < 0.001);
    assert!((north_lat - 40.7805).abs() < 0.001);
}

#[test]
fn test_x_out_of_range() {
    let result = TileCoordinate::new(4, 0, 2);
    assert!(matches!(
        result,
        Err(CoordError::OutOfRange { x: 4, y: 0, zoom: 2 })
    ));
}

#[test]
fn test_y_out_of_range() {
    let result = TileCoordinate::new(0, 1, 0);
    assert!(matches!(result, Err(CoordError::OutOfRange { .. })));
}

#[test]
fn test_zoom_out_of_range() {
    let result = TileCoordinate::new(0, 0, MAX_ZOOM + 1);
    assert_eq!(result.unwrap_err(), CoordError::InvalidZoom(MAX_ZOOM + 1));
}

#[test]
fn test_footprint_rejects_unvalidated_coordinate() {
    let tile = TileCoordinate { x: 8, y: 8, zoom: 3 };
    assert!(tile_footprint(&tile).is_err());
}

#[test]
fn test_coord_error_display() {
    let err = CoordError::OutOfRange { x: 9, y: 1, zoom: 3 };
    let msg = err.to_string();
    assert!(msg.contains("(9, 1)"));
    assert!(msg.contains("zoom 3"));
    assert!(msg.contains("0..8"));
}

#[test]
fn test_mercator_origin_is_null_island() {
    let (lon, lat) = mercator_to_lon_lat(0.0, 0.0);
    assert!(lon.abs() < EPS);
    assert!(lat.abs() < EPS);
}

#[test]
fn test_mercator_roundtrip_near_new_york() {
    let (x, y) = lon_lat_to_mercator(-74.006, 40.7128);
    let (lon, lat) = mercator_to_lon_lat(x, y);
    assert!((lon - (-74.006)).abs() < 1e-9);
    assert!((lat - 40.7128).abs() < 1e-9);
}

#[test]
fn test_tile_display() {
    let tile = TileCoordinate::new(1205, 1539, 12).unwrap();
    assert_eq!(tile.to_string(), "12/1205/1539");
}

proptest! {
    /// Property: every valid tile footprint is square and inside the Mercator square.
    #[test]
    fn prop_footprint_square_and_in_bounds(
        zoom in 0u8..=22,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let n = TileCoordinate::tiles_per_axis(zoom) as f64;
        let x = ((fx * n) as u32).min((n - 1.0) as u32);
        let y = ((fy * n) as u32).min((n - 1.0) as u32);
        let tile = TileCoordinate::new(x, y, zoom).unwrap();
        let bbox = tile_footprint(&tile).unwrap();

        let tolerance = 1e-6 * HALF_EARTH;
        prop_assert!(bbox.west >= -HALF_EARTH - tolerance);
        prop_assert!(bbox.east <= HALF_EARTH + tolerance);
        prop_assert!(bbox.south >= -HALF_EARTH - tolerance);
        prop_assert!(bbox.north <= HALF_EARTH + tolerance);
        prop_assert!(bbox.west < bbox.east);
        prop_assert!(bbox.south < bbox.north);
        prop_assert!((bbox.width() - bbox.height()).abs() <= 1e-6 * bbox.width().max(1.0));
    }
}

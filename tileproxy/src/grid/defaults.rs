//! Built-in gridset: NYC DoITT GeoWebCache, New York State Plane Long Island.
//!
//! Values come from the service's WMS GetCapabilities document.

/// Gridset extent in state-plane feet: west, south, east, north.
pub const DEFAULT_EXTENT: [f64; 4] = [
    700_000.0,
    -4_444.445_564_304_478_5,
    1_366_666.668_346_456_7,
    440_000.0,
];

/// Native resolutions in feet per pixel, coarsest first.
pub const DEFAULT_RESOLUTIONS: [f64; 14] = [
    434.027_778_871_391_1,
    303.819_445_209_973_7,
    222.222_222_782_152_22,
    111.111_111_391_076_11,
    55.555_555_695_538_054,
    27.777_777_847_769_027,
    13.888_888_923_884_513,
    6.944_444_461_942_257,
    3.472_222_230_971_128_4,
    1.736_111_115_485_564_2,
    0.868_055_557_742_782_1,
    0.434_027_778_871_391_05,
    0.217_013_889_435_695_52,
    0.108_506_944_717_847_76,
];

/// Pixel size of one gridset cell on each side.
pub const DEFAULT_CELL_SIZE: u32 = 512;

/// EPSG:2263, NAD83 / New York Long Island (ftUS).
pub const DEFAULT_PROJ: &str = "+proj=lcc +lat_1=41.03333333333333 +lat_2=40.66666666666666 \
+lat_0=40.16666666666666 +lon_0=-74 +x_0=300000.0000000001 +y_0=0 +ellps=GRS80 +datum=NAD83 \
+to_meter=0.3048006096012192 +no_defs";

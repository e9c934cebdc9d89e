//! Pipeline stages for tile generation.
//!
//! Each stage is responsible for a single step of one tile request:
//!
//! 1. **Fetch** - Download the 1, 2 or 4 planned source cells concurrently
//! 2. **Compose** - Stitch the cells into one raster by quadrant
//! 3. **Crop** - Cut out the footprint, resample to 256×256 and encode PNG

mod compose;
mod crop;
mod fetch;

pub use compose::{compose, compose_stage, CompositeRaster};
pub use crop::{
    crop_and_resample, crop_stage, encode_png, CropWindow, OutputTile, OUTPUT_CONTENT_TYPE,
    OUTPUT_TILE_SIZE,
};
pub use fetch::{fetch_stage, FetchedCells};

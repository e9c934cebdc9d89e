//! Crop stage - cuts the footprint out of the composite and resamples it.
//!
//! The crop window is derived from the footprint's position relative to the
//! `nw` cell, in source pixels. Output is always
//! [`OUTPUT_TILE_SIZE`]² PNG.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use tracing::{debug, error, instrument};

use crate::coord::{BoundingBox, StatePlane};
use crate::grid::GridCell;
use crate::pipeline::stages::CompositeRaster;
use crate::pipeline::{BlockingExecutor, TileError};

/// Edge length of every output tile in pixels.
pub const OUTPUT_TILE_SIZE: u32 = 256;

/// MIME type of encoded output tiles.
pub const OUTPUT_CONTENT_TYPE: &str = "image/png";

/// Slack allowed when checking the crop window against the canvas, in pixels.
///
/// Projected corners rarely land on whole pixels; anything beyond half a
/// pixel means the plan did not cover the footprint.
const CROP_TOLERANCE: f64 = 0.5;

/// A rendered tile ready to send to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTile {
    /// Encoded image bytes
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub content_type: &'static str,
}

/// Footprint position on the composite canvas, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropWindow {
    pub x: f64,
    pub y: f64,
    /// Edge length; the window is square
    pub extent: f64,
}

impl CropWindow {
    /// Locates `footprint` on a composite whose top-left is `nw`'s top-left.
    pub fn locate(
        footprint: &BoundingBox<StatePlane>,
        nw: &GridCell,
        resolution: f64,
        cell_size: u32,
    ) -> Self {
        let x = (footprint.west - nw.xmin()) / resolution;
        let y = cell_size as f64 - (footprint.north - nw.ymin()) / resolution;
        let extent = (footprint.east - nw.xmin()) / resolution - x;
        Self { x, y, extent }
    }

    /// Checks the window fits a `width × height` canvas.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), TileError> {
        let fits = self.x.is_finite()
            && self.y.is_finite()
            && self.extent.is_finite()
            && self.extent > 0.0
            && self.x >= -CROP_TOLERANCE
            && self.y >= -CROP_TOLERANCE
            && self.x + self.extent <= width as f64 + CROP_TOLERANCE
            && self.y + self.extent <= height as f64 + CROP_TOLERANCE;

        if fits {
            Ok(())
        } else {
            Err(TileError::CropOutOfBounds {
                x: self.x,
                y: self.y,
                extent: self.extent,
                width,
                height,
            })
        }
    }

    /// Integer pixel rectangle `(x, y, width, height)` clamped to the canvas.
    fn pixel_rect(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let x0 = (self.x.round().max(0.0) as u32).min(width - 1);
        let y0 = (self.y.round().max(0.0) as u32).min(height - 1);
        let size = self.extent.round().max(1.0) as u32;
        (x0, y0, size.min(width - x0), size.min(height - y0))
    }
}

/// Crops, resamples and encodes on the blocking executor.
#[instrument(skip(composite, executor))]
pub async fn crop_stage<E>(
    composite: CompositeRaster,
    window: CropWindow,
    executor: &E,
) -> Result<OutputTile, TileError>
where
    E: BlockingExecutor,
{
    if let Err(e) = window.validate(composite.width(), composite.height()) {
        error!(error = %e, "Crop window outside composite");
        return Err(e);
    }

    let tile = executor
        .execute_blocking(move || {
            let resampled = crop_and_resample(composite.image(), &window);
            encode_png(&resampled)
        })
        .await
        .map_err(|e| TileError::Internal(format!("crop task failed: {}", e)))??;

    debug!(bytes = tile.data.len(), "Crop stage complete");

    Ok(tile)
}

/// Cuts `window` out of `image` and resamples it to the output size with
/// bilinear filtering.
///
/// The window must already have passed [`CropWindow::validate`].
pub fn crop_and_resample(image: &RgbaImage, window: &CropWindow) -> RgbaImage {
    let (x, y, w, h) = window.pixel_rect(image.width(), image.height());
    let cropped = imageops::crop_imm(image, x, y, w, h).to_image();
    imageops::resize(
        &cropped,
        OUTPUT_TILE_SIZE,
        OUTPUT_TILE_SIZE,
        FilterType::Triangle,
    )
}

/// Encodes an RGBA image as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<OutputTile, TileError> {
    let mut data = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
        .map_err(|e| TileError::Encoding(e.to_string()))?;

    Ok(OutputTile {
        data,
        width: image.width(),
        height: image.height(),
        content_type: OUTPUT_CONTENT_TYPE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::Quadrant;
    use crate::pipeline::stages::{compose, FetchedCells};
    use crate::pipeline::SyncExecutor;
    use image::Rgba;
    use proptest::prelude::*;

    fn cell(col: i64, row: i64, west: f64, north: f64, span: f64) -> GridCell {
        GridCell {
            col,
            row,
            resolution: 1.0,
            bounds: BoundingBox::new(west, north - span, west + span, north),
        }
    }

    fn solid_png(size: u32, color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(size, size, Rgba(color));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn composite(quadrants: &[Quadrant], size: u32) -> CompositeRaster {
        let images: FetchedCells = quadrants
            .iter()
            .map(|q| (*q, solid_png(size, [10, 20, 30, 255])))
            .collect();
        compose(&images, size).unwrap()
    }

    #[test]
    fn test_locate_inside_single_cell() {
        // nw cell spans x 100..200, y 800..900 at 1 ft/px
        let nw = cell(1, 1, 100.0, 900.0, 100.0);
        let fp = BoundingBox::new(110.0, 830.0, 160.0, 880.0);

        let window = CropWindow::locate(&fp, &nw, 1.0, 100);
        assert_eq!(window, CropWindow { x: 10.0, y: 20.0, extent: 50.0 });
        assert!(window.validate(100, 100).is_ok());
    }

    #[test]
    fn test_locate_across_vertical_boundary() {
        let nw = cell(1, 1, 100.0, 900.0, 100.0);
        let fp = BoundingBox::new(180.0, 830.0, 230.0, 880.0);

        let window = CropWindow::locate(&fp, &nw, 1.0, 100);
        assert_eq!(window.x, 80.0);
        assert_eq!(window.extent, 50.0);
        assert!(window.validate(100, 100).is_err());
        assert!(window.validate(200, 100).is_ok());
    }

    #[test]
    fn test_half_pixel_overshoot_tolerated() {
        let window = CropWindow { x: -0.4, y: 0.0, extent: 100.3 };
        assert!(window.validate(100, 100).is_ok());

        let window = CropWindow { x: -0.6, y: 0.0, extent: 50.0 };
        assert!(matches!(
            window.validate(100, 100),
            Err(TileError::CropOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_degenerate_window_rejected() {
        let window = CropWindow { x: 0.0, y: 0.0, extent: 0.0 };
        assert!(window.validate(100, 100).is_err());

        let window = CropWindow { x: f64::NAN, y: 0.0, extent: 10.0 };
        assert!(window.validate(100, 100).is_err());
    }

    #[test]
    fn test_pixel_rect_clamped_to_canvas() {
        let window = CropWindow { x: -0.4, y: 60.3, extent: 40.4 };
        assert_eq!(window.pixel_rect(100, 100), (0, 60, 40, 40));

        let window = CropWindow { x: 70.2, y: 70.0, extent: 30.4 };
        assert_eq!(window.pixel_rect(100, 100), (70, 70, 30, 30));
    }

    #[test]
    fn test_crop_output_is_tile_sized_and_keeps_color() {
        let composite = composite(&[Quadrant::Nw], 64);
        let window = CropWindow { x: 8.0, y: 8.0, extent: 20.0 };

        let out = crop_and_resample(composite.image(), &window);
        assert_eq!((out.width(), out.height()), (OUTPUT_TILE_SIZE, OUTPUT_TILE_SIZE));
        assert_eq!(out.get_pixel(128, 128), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_encode_png_round_trips_dimensions() {
        let img = RgbaImage::from_pixel(OUTPUT_TILE_SIZE, OUTPUT_TILE_SIZE, Rgba([1, 2, 3, 255]));
        let tile = encode_png(&img).unwrap();

        assert_eq!(tile.content_type, "image/png");
        assert_eq!(image::guess_format(&tile.data).unwrap(), ImageFormat::Png);
        let decoded = image::load_from_memory(&tile.data).unwrap();
        assert_eq!(decoded.width(), OUTPUT_TILE_SIZE);
    }

    #[tokio::test]
    async fn test_crop_stage_rejects_uncovered_window() {
        let composite = composite(&[Quadrant::Nw], 64);
        let window = CropWindow { x: 40.0, y: 0.0, extent: 40.0 };

        let result = crop_stage(composite, window, &SyncExecutor).await;
        assert!(matches!(result, Err(ref e) if e.is_defect()));
    }

    #[tokio::test]
    async fn test_crop_stage_produces_png_tile() {
        let composite = composite(&[Quadrant::Nw, Quadrant::Ne], 64);
        let window = CropWindow { x: 50.0, y: 10.0, extent: 30.0 };

        let tile = crop_stage(composite, window, &SyncExecutor).await.unwrap();
        assert_eq!((tile.width, tile.height), (OUTPUT_TILE_SIZE, OUTPUT_TILE_SIZE));
    }

    proptest! {
        /// Property: any window that validates produces a 256×256 tile.
        #[test]
        fn prop_valid_window_always_yields_tile_size(
            x in 0.0f64..60.0,
            y in 0.0f64..60.0,
            extent in 1.0f64..64.0,
        ) {
            let window = CropWindow { x, y, extent };
            prop_assume!(window.validate(64, 64).is_ok());

            let image = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
            let out = crop_and_resample(&image, &window);
            prop_assert_eq!(out.dimensions(), (OUTPUT_TILE_SIZE, OUTPUT_TILE_SIZE));
        }
    }
}

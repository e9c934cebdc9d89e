//! Compose stage - stitches fetched cells into one raster.
//!
//! Quadrants are pasted in fixed order at offsets derived from the quadrant
//! alone, so the result never depends on which fetch finished first.

use image::{imageops, RgbaImage};
use tracing::{debug, instrument};

use crate::coverage::Quadrant;
use crate::pipeline::stages::FetchedCells;
use crate::pipeline::{BlockingExecutor, TileError};

/// Stitched source imagery, one cell per quadrant.
#[derive(Debug, Clone)]
pub struct CompositeRaster {
    image: RgbaImage,
}

impl CompositeRaster {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decodes and stitches `images` on the blocking executor.
#[instrument(skip(images, executor), fields(cells = images.len()))]
pub async fn compose_stage<E>(
    images: FetchedCells,
    cell_size: u32,
    executor: &E,
) -> Result<CompositeRaster, TileError>
where
    E: BlockingExecutor,
{
    let composite = executor
        .execute_blocking(move || compose(&images, cell_size))
        .await
        .map_err(|e| TileError::Internal(format!("compose task failed: {}", e)))??;

    debug!(
        width = composite.width(),
        height = composite.height(),
        "Compose stage complete"
    );

    Ok(composite)
}

/// Stitches decoded quadrant images into a single canvas.
///
/// The canvas is one cell wide unless `ne` or `se` is present, and one cell
/// tall unless `sw` or `se` is present.
///
/// # Errors
///
/// [`TileError::Composition`] if `nw` is missing, an image cannot be decoded,
/// or an image is not `cell_size × cell_size`.
pub fn compose(images: &FetchedCells, cell_size: u32) -> Result<CompositeRaster, TileError> {
    if !images.contains_key(&Quadrant::Nw) {
        return Err(TileError::Composition("missing nw cell".to_string()));
    }

    let wide = images.keys().any(|q| q.is_east());
    let tall = images.keys().any(|q| q.is_south());
    let width = if wide { cell_size * 2 } else { cell_size };
    let height = if tall { cell_size * 2 } else { cell_size };

    let mut canvas = RgbaImage::new(width, height);

    // BTreeMap iteration is quadrant order
    for (quadrant, data) in images {
        let cell = decode_cell(*quadrant, data)?;
        if cell.width() != cell_size || cell.height() != cell_size {
            return Err(TileError::Composition(format!(
                "{} cell is {}x{}, expected {}x{}",
                quadrant,
                cell.width(),
                cell.height(),
                cell_size,
                cell_size
            )));
        }

        let (x, y) = quadrant.pixel_offset(cell_size);
        imageops::replace(&mut canvas, &cell, x as i64, y as i64);
    }

    Ok(CompositeRaster { image: canvas })
}

fn decode_cell(quadrant: Quadrant, data: &[u8]) -> Result<RgbaImage, TileError> {
    image::load_from_memory(data)
        .map(|img| img.to_rgba8())
        .map_err(|e| TileError::Composition(format!("cannot decode {} cell: {}", quadrant, e)))
}

//! Coverage planning: which source cells a footprint needs.
//!
//! A requested tile is always smaller than one source cell, so it touches at
//! most a 2×2 block of cells. The block is described by quadrant relative to
//! the cell holding the footprint's north-west corner.

use std::collections::BTreeMap;
use std::fmt;

use crate::coord::{BoundingBox, StatePlane};
use crate::grid::{GridCell, GridError, GridSpec};

/// Position of a source cell within the 2×2 coverage block.
///
/// Ordering follows paste order: nw, ne, sw, se.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::Nw, Quadrant::Ne, Quadrant::Sw, Quadrant::Se];

    /// True for the quadrants in the eastern column of the block.
    pub fn is_east(self) -> bool {
        matches!(self, Quadrant::Ne | Quadrant::Se)
    }

    /// True for the quadrants in the southern row of the block.
    pub fn is_south(self) -> bool {
        matches!(self, Quadrant::Sw | Quadrant::Se)
    }

    /// Pixel offset of this quadrant on the composite canvas.
    pub fn pixel_offset(self, cell_size: u32) -> (u32, u32) {
        let x = if self.is_east() { cell_size } else { 0 };
        let y = if self.is_south() { cell_size } else { 0 };
        (x, y)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quadrant::Nw => "nw",
            Quadrant::Ne => "ne",
            Quadrant::Sw => "sw",
            Quadrant::Se => "se",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source cells required to cover one footprint, keyed by quadrant.
#[derive(Debug, Clone, PartialEq)]
pub struct CoveragePlan {
    resolution: f64,
    cells: BTreeMap<Quadrant, GridCell>,
}

impl CoveragePlan {
    /// Resolution shared by every cell in the plan.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// The cell holding the footprint's north-west corner.
    pub fn nw(&self) -> &GridCell {
        // `plan` always inserts nw
        &self.cells[&Quadrant::Nw]
    }

    pub fn get(&self, quadrant: Quadrant) -> Option<&GridCell> {
        self.cells.get(&quadrant)
    }

    pub fn contains(&self, quadrant: Quadrant) -> bool {
        self.cells.contains_key(&quadrant)
    }

    /// Cells in quadrant order.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &GridCell)> {
        self.cells.iter().map(|(q, c)| (*q, c))
    }

    pub fn quadrants(&self) -> Vec<Quadrant> {
        self.cells.keys().copied().collect()
    }

    /// Number of planned cells: 1, 2 or 4.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Union of all planned cell bounds.
    pub fn covered_bounds(&self) -> BoundingBox<StatePlane> {
        self.cells.values().fold(self.nw().bounds, |acc, cell| {
            BoundingBox::new(
                acc.west.min(cell.bounds.west),
                acc.south.min(cell.bounds.south),
                acc.east.max(cell.bounds.east),
                acc.north.max(cell.bounds.north),
            )
        })
    }
}

/// Works out which source cells must be fetched to cover `footprint`.
///
/// `nw` comes from the north-west corner and is always present. `ne` and `sw`
/// are added only when the north-east / south-west corners fall in a different
/// cell. `se` is added only when both `ne` and `sw` are: the gridset is regular
/// and tiles are smaller than a cell, so a footprint cannot reach the
/// south-east cell without crossing both boundaries.
///
/// The crop is square with the footprint's width as its edge, so the south
/// corners are taken from whichever of the footprint and the crop reaches
/// further south.
pub fn plan(
    footprint: &BoundingBox<StatePlane>,
    resolution: f64,
    grid: &GridSpec,
) -> Result<CoveragePlan, GridError> {
    let mut cells = BTreeMap::new();

    let nw = grid.cell_bounds(footprint.west, footprint.north, resolution)?;

    let ne = grid.cell_bounds(footprint.east, footprint.north, resolution)?;
    let has_ne = !ne.same_cell(&nw);
    if has_ne {
        cells.insert(Quadrant::Ne, ne);
    }

    let south = cropped_south(footprint);
    let sw = grid.cell_bounds(footprint.west, south, resolution)?;
    let has_sw = !sw.same_cell(&nw);
    if has_sw {
        cells.insert(Quadrant::Sw, sw);
    }

    if has_ne && has_sw {
        let se = grid.cell_bounds(footprint.east, south, resolution)?;
        cells.insert(Quadrant::Se, se);
    }

    cells.insert(Quadrant::Nw, nw);

    Ok(CoveragePlan { resolution, cells })
}

/// South edge of the square crop window hung from the footprint's north edge.
///
/// Reprojected footprints are not square; west of the projection's central
/// meridian they come out wider than tall.
fn cropped_south(footprint: &BoundingBox<StatePlane>) -> f64 {
    footprint.south.min(footprint.north - footprint.width())
}

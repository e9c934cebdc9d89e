//! Plan command - show how a tile maps onto the source grid.
//!
//! Performs no network I/O, which makes it useful for checking grid settings.

use std::path::PathBuf;
use tileproxy::service::TilePlan;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the plan command.
pub struct PlanArgs {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

/// Run the plan command.
pub fn run(config_path: Option<PathBuf>, debug: bool, args: PlanArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, debug)?;
    runner.log_startup("plan");

    let service = runner.create_service()?;
    let plan = service.plan_tile(args.x, args.y, args.zoom)?;

    for line in describe(&plan) {
        println!("{}", line);
    }
    Ok(())
}

/// Human-readable summary of a tile plan.
pub fn describe(plan: &TilePlan) -> Vec<String> {
    let mut lines = vec![
        format!("Tile: {}", plan.tile),
        format!("  Mercator:  {}", plan.mercator),
        format!("  Footprint: {}", plan.footprint),
        format!(
            "  Resolution: {:.4} ft/px (requested {:.4})",
            plan.resolution, plan.requested_resolution
        ),
        format!("Source cells ({}):", plan.coverage.cell_count()),
    ];

    for (quadrant, cell) in plan.coverage.iter() {
        lines.push(format!(
            "  {:<2} col={} row={} bbox={}",
            quadrant, cell.col, cell.row, cell.bounds
        ));
    }

    lines.push(format!(
        "Crop: x={:.2} y={:.2} extent={:.2}",
        plan.crop.x, plan.crop.y, plan.crop.extent
    ));
    lines
}

//! Tile command - render a single tile to a PNG file.

use std::path::PathBuf;
use std::time::Instant;
use tileproxy::pipeline::TileError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the tile command.
pub struct TileArgs {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
    /// Upstream layer; falls back to the configured default
    pub layer: Option<String>,
    pub output: PathBuf,
}

/// Run the tile command.
///
/// Ctrl-C cancels the in-flight fetches and exits without writing a file.
pub fn run(config_path: Option<PathBuf>, debug: bool, args: TileArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, debug)?;
    runner.log_startup("tile");

    let runtime = runner.build_runtime()?;
    let service = runtime.block_on(async { runner.create_service() })?;

    let layer = args
        .layer
        .unwrap_or_else(|| service.default_layer().to_string());

    println!("Rendering tile {}/{}/{}", args.zoom, args.x, args.y);
    println!("  Layer:  {}", layer);
    println!("  Source: {} ({})", service.source_name(), runner.config().upstream.url);

    let cancel = CancellationToken::new();
    let start = Instant::now();

    let result = runtime.block_on(async {
        let ctrl_c_token = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling tile request");
                ctrl_c_token.cancel();
            }
        });

        service
            .get_tile_cancellable(&layer, args.x, args.y, args.zoom, cancel.clone())
            .await
    });

    let tile = match result {
        Ok(tile) => tile,
        Err(TileError::Cancelled) => {
            println!("Cancelled");
            return Ok(());
        }
        Err(e) => return Err(CliError::Tile(e)),
    };

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Tile rendered"
    );
    println!(
        "Rendered {}x{} {} in {:.2}s",
        tile.width,
        tile.height,
        tile.content_type,
        start.elapsed().as_secs_f64()
    );

    runner.save_tile(&args.output, &tile.data)
}

//! Tile service facade implementation.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::config::ServiceConfig;
use super::error::ServiceError;
use crate::config::ConfigFile;
use crate::coord::{tile_footprint, BoundingBox, StatePlane, TileCoordinate, WebMercator};
use crate::coverage::{plan, CoveragePlan};
use crate::grid::GridSpec;
use crate::pipeline::stages::{compose_stage, crop_stage, fetch_stage};
use crate::pipeline::{
    BlockingExecutor, CropWindow, OutputTile, TileError, TokioExecutor, OUTPUT_TILE_SIZE,
};
use crate::projection::Reprojector;
use crate::provider::{AsyncReqwestClient, RasterSource, WmsSource};

/// Everything decided about a tile before any source imagery is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlan {
    pub tile: TileCoordinate,
    /// Footprint in Web Mercator metres
    pub mercator: BoundingBox<WebMercator>,
    /// Footprint in source CRS units
    pub footprint: BoundingBox<StatePlane>,
    /// Source units per output pixel the tile asks for
    pub requested_resolution: f64,
    /// Native grid resolution used to serve it
    pub resolution: f64,
    pub coverage: CoveragePlan,
    /// Footprint position on the composite
    pub crop: CropWindow,
}

/// Reprojects Web Mercator tile requests onto the source gridset.
///
/// Holds only immutable state, so one instance can serve any number of
/// concurrent requests.
///
/// # Example
///
/// ```ignore
/// use tileproxy::config::ConfigFile;
/// use tileproxy::service::TileService;
///
/// let service = TileService::from_config(&ConfigFile::load()?)?;
/// let tile = service.get_tile("basemap", 1205, 1539, 12).await?;
/// std::fs::write("tile.png", &tile.data)?;
/// ```
pub struct TileService<S: RasterSource, E: BlockingExecutor = TokioExecutor> {
    source: Arc<S>,
    executor: E,
    grid: Arc<GridSpec>,
    reprojector: Arc<Reprojector>,
    request_timeout: Duration,
    default_layer: String,
}

impl TileService<WmsSource<AsyncReqwestClient>> {
    /// Creates a service talking to the WMS described by `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid settings are inconsistent, the projection
    /// cannot be parsed, or the HTTP client cannot be created.
    pub fn from_config(file: &ConfigFile) -> Result<Self, ServiceError> {
        let config = ServiceConfig::from_config_file(file)?;

        let http_client = AsyncReqwestClient::with_timeout(file.upstream.timeout)?;
        let source = WmsSource::with_base_url(http_client, file.upstream.url.clone())
            .with_srs(file.upstream.srs.clone())
            .with_format(file.upstream.format.clone());

        info!(
            url = %file.upstream.url,
            srs = %file.upstream.srs,
            layer = %file.upstream.default_layer,
            "Tile service configured"
        );

        Self::new(source, config)
    }
}

impl<S: RasterSource> TileService<S> {
    /// Creates a service over `source` using the Tokio blocking pool.
    pub fn new(source: S, config: ServiceConfig) -> Result<Self, ServiceError> {
        Self::with_executor(source, config, TokioExecutor::new())
    }
}

impl<S: RasterSource, E: BlockingExecutor> TileService<S, E> {
    /// Creates a service with a custom executor for CPU-bound stages.
    pub fn with_executor(
        source: S,
        config: ServiceConfig,
        executor: E,
    ) -> Result<Self, ServiceError> {
        let reprojector = Reprojector::new(config.projection())?;

        Ok(Self {
            source: Arc::new(source),
            executor,
            grid: Arc::new(config.grid().clone()),
            reprojector: Arc::new(reprojector),
            request_timeout: config.request_timeout(),
            default_layer: config.default_layer().to_string(),
        })
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// The upstream raster source.
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Layer used when a request names none.
    pub fn default_layer(&self) -> &str {
        &self.default_layer
    }

    /// Works out footprint, resolution and source cells for a tile.
    ///
    /// Performs no I/O.
    pub fn plan_tile(&self, x: u32, y: u32, zoom: u8) -> Result<TilePlan, TileError> {
        let tile = TileCoordinate::new(x, y, zoom)
            .map_err(|_| TileError::InvalidTileCoordinate { x, y, zoom })?;
        let mercator =
            tile_footprint(&tile).map_err(|_| TileError::InvalidTileCoordinate { x, y, zoom })?;
        let footprint = self.reprojector.reproject(&mercator)?;

        let requested_resolution = footprint.width() / OUTPUT_TILE_SIZE as f64;
        let resolution = self.grid.ladder().select(requested_resolution);
        debug!(
            tile = %tile,
            requested = requested_resolution,
            resolution,
            "Next coarser grid resolution selected"
        );

        let coverage = plan(&footprint, resolution, &self.grid)?;
        let crop = CropWindow::locate(
            &footprint,
            coverage.nw(),
            resolution,
            self.grid.cell_size(),
        );

        Ok(TilePlan {
            tile,
            mercator,
            footprint,
            requested_resolution,
            resolution,
            coverage,
            crop,
        })
    }

    /// Renders the 256×256 PNG for tile `(x, y, zoom)` of `layer`.
    ///
    /// An empty `layer` means the configured default layer.
    ///
    /// Either every planned source cell is fetched and the tile is produced,
    /// or an error is returned; partial tiles are never produced.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub async fn get_tile(
        &self,
        layer: &str,
        x: u32,
        y: u32,
        zoom: u8,
    ) -> Result<OutputTile, TileError> {
        let layer = if layer.is_empty() {
            self.default_layer.as_str()
        } else {
            layer
        };
        let result = self.render(layer, x, y, zoom).await;
        match &result {
            Ok(tile) => debug!(bytes = tile.data.len(), "Tile rendered"),
            Err(e) => log_failure(e),
        }
        result
    }

    /// Like [`get_tile`](Self::get_tile), but gives up when `cancel` fires.
    ///
    /// Cancelling drops the in-flight fetches.
    pub async fn get_tile_cancellable(
        &self,
        layer: &str,
        x: u32,
        y: u32,
        zoom: u8,
        cancel: CancellationToken,
    ) -> Result<OutputTile, TileError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(x, y, zoom, "Tile request cancelled");
                Err(TileError::Cancelled)
            }
            result = self.get_tile(layer, x, y, zoom) => result,
        }
    }

    async fn render(
        &self,
        layer: &str,
        x: u32,
        y: u32,
        zoom: u8,
    ) -> Result<OutputTile, TileError> {
        let plan = self.plan_tile(x, y, zoom)?;
        let cell_size = self.grid.cell_size();

        let images = fetch_stage(
            Arc::clone(&self.source),
            layer,
            &plan.coverage,
            cell_size,
            self.request_timeout,
        )
        .await?;
        let composite = compose_stage(images, cell_size, &self.executor).await?;
        crop_stage(composite, plan.crop, &self.executor).await
    }
}

fn log_failure(err: &TileError) {
    match err {
        e if e.is_defect() => error!(error = %e, "Tile geometry defect"),
        e if e.is_upstream() => warn!(error = %e, "Upstream fetch failed"),
        TileError::Internal(_) | TileError::Encoding(_) | TileError::Composition(_) => {
            error!(error = %err, "Tile rendering failed")
        }
        _ => debug!(error = %err, "Tile request rejected"),
    }
}

//! WMS GetMap raster source

use tracing::debug;

use super::http::AsyncHttpClient;
use super::types::{ProviderError, RasterSource};
use crate::grid::GridCell;

/// Default WMS endpoint of the NYC orthoimagery gridset.
pub const DEFAULT_WMS_URL: &str = "http://maps1.nyc.gov/geowebcache/service/wms/";

/// Default spatial reference requested from the WMS.
pub const DEFAULT_SRS: &str = "EPSG:2263";

/// Default image format requested from the WMS.
pub const DEFAULT_FORMAT: &str = "image/png";

/// Raster source backed by a WMS 1.1.1 `GetMap` endpoint.
///
/// Each grid cell becomes one GetMap request whose bbox is exactly the cell's
/// bounds, so a tile-caching WMS can answer it from its cache.
pub struct WmsSource<C: AsyncHttpClient> {
    http_client: C,
    base_url: String,
    srs: String,
    format: String,
}

impl<C: AsyncHttpClient> WmsSource<C> {
    /// Creates a source for the default NYC endpoint.
    pub fn new(http_client: C) -> Self {
        Self::with_base_url(http_client, DEFAULT_WMS_URL.to_string())
    }

    /// Creates a source for a custom WMS endpoint.
    pub fn with_base_url(http_client: C, base_url: String) -> Self {
        Self {
            http_client,
            base_url,
            srs: DEFAULT_SRS.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }

    /// Sets the SRS code sent with each request.
    pub fn with_srs(mut self, srs: impl Into<String>) -> Self {
        self.srs = srs.into();
        self
    }

    /// Sets the image MIME type sent with each request.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn srs(&self) -> &str {
        &self.srs
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Constructs the GetMap URL for one cell.
    pub fn build_url(&self, layer: &str, cell: &GridCell, size: u32) -> String {
        format!(
            "{}?service=WMS&request=GetMap&version=1.1.1&format={}&layers={}&srs={}&width={}&height={}&bbox={},{},{},{}",
            self.base_url,
            self.format,
            layer,
            self.srs,
            size,
            size,
            cell.xmin(),
            cell.ymin(),
            cell.xmax(),
            cell.ymax()
        )
    }
}

impl<C: AsyncHttpClient> RasterSource for WmsSource<C> {
    async fn fetch_cell(
        &self,
        layer: &str,
        cell: &GridCell,
        size: u32,
    ) -> Result<Vec<u8>, ProviderError> {
        let url = self.build_url(layer, cell, size);
        debug!(
            layer = layer,
            col = cell.col,
            row = cell.row,
            url = %url,
            "Fetching source cell"
        );
        self.http_client.get(&url).await
    }

    fn name(&self) -> &str {
        "WMS"
    }
}

//! Upstream raster sources.
//!
//! A [`RasterSource`] hands back the encoded image for one source grid cell.
//! [`WmsSource`] is the production implementation; it sits on top of an
//! [`AsyncHttpClient`] so the network can be swapped for a mock in tests.

mod http;
mod types;
mod wms;

pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use types::{ProviderError, RasterSource};
pub use wms::{WmsSource, DEFAULT_FORMAT, DEFAULT_SRS, DEFAULT_WMS_URL};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;

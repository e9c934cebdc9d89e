//! Provider types and traits

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::grid::GridCell;

/// Errors that can occur while fetching source imagery.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed or returned a non-success status
    HttpError(String),
    /// Request did not complete within the configured timeout
    Timeout(Duration),
    /// Response body is not usable imagery
    InvalidResponse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::Timeout(after) => {
                write!(f, "request timed out after {}ms", after.as_millis())
            }
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Upstream service serving grid-aligned source imagery.
///
/// Implementors return the raw encoded image for one grid cell rendered at
/// `size × size` pixels.
pub trait RasterSource: Send + Sync + 'static {
    /// Fetches the image for `cell` in layer `layer`.
    ///
    /// # Returns
    ///
    /// Raw encoded image bytes (typically PNG) or an error.
    fn fetch_cell(
        &self,
        layer: &str,
        cell: &GridCell,
        size: u32,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;

    /// Returns the source's name for logging and identification.
    fn name(&self) -> &str;
}

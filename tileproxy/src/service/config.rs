//! Service configuration types.

use std::time::Duration;

use crate::config::{ConfigFile, ConfigFileError, DEFAULT_LAYER};
use crate::grid::defaults::DEFAULT_PROJ;
use crate::grid::GridSpec;
use crate::provider::DEFAULT_TIMEOUT_SECS;

/// Configuration for [`TileService`](super::TileService).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tileproxy::service::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .request_timeout(Duration::from_secs(10))
///     .default_layer("aerial2016")
///     .build();
///
/// assert_eq!(config.default_layer(), "aerial2016");
/// ```
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Source gridset
    grid: GridSpec,
    /// proj string of the source CRS
    projection: String,
    /// Bound on each source cell request
    request_timeout: Duration,
    /// Layer used when a request names none
    default_layer: String,
}

impl ServiceConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Build service configuration from a loaded config file.
    pub fn from_config_file(file: &ConfigFile) -> Result<Self, ConfigFileError> {
        Ok(Self {
            grid: file.grid_spec()?,
            projection: file.grid.proj.clone(),
            request_timeout: Duration::from_secs(file.upstream.timeout),
            default_layer: file.upstream.default_layer.clone(),
        })
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn projection(&self) -> &str {
        &self.projection
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn default_layer(&self) -> &str {
        &self.default_layer
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            projection: DEFAULT_PROJ.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_layer: DEFAULT_LAYER.to_string(),
        }
    }
}

/// Builder for ServiceConfig.
///
/// Unset fields fall back to the built-in NYC defaults.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfigBuilder {
    grid: Option<GridSpec>,
    projection: Option<String>,
    request_timeout: Option<Duration>,
    default_layer: Option<String>,
}

impl ServiceConfigBuilder {
    /// Set the source gridset.
    pub fn grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the proj string of the source CRS.
    pub fn projection(mut self, proj: impl Into<String>) -> Self {
        self.projection = Some(proj.into());
        self
    }

    /// Set the per-request upstream timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the layer used when a request names none.
    pub fn default_layer(mut self, layer: impl Into<String>) -> Self {
        self.default_layer = Some(layer.into());
        self
    }

    /// Build the ServiceConfig.
    pub fn build(self) -> ServiceConfig {
        let defaults = ServiceConfig::default();
        ServiceConfig {
            grid: self.grid.unwrap_or(defaults.grid),
            projection: self.projection.unwrap_or(defaults.projection),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            default_layer: self.default_layer.unwrap_or(defaults.default_layer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.default_layer(), DEFAULT_LAYER);
        assert_eq!(config.grid(), &GridSpec::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServiceConfig::builder()
            .projection("+proj=longlat +datum=WGS84")
            .request_timeout(Duration::from_millis(500))
            .build();

        assert_eq!(config.projection(), "+proj=longlat +datum=WGS84");
        assert_eq!(config.request_timeout(), Duration::from_millis(500));
        assert_eq!(config.default_layer(), DEFAULT_LAYER);
    }

    #[test]
    fn test_from_config_file() {
        let mut file = ConfigFile::default();
        file.upstream.timeout = 5;
        file.upstream.default_layer = "aerial2016".to_string();

        let config = ServiceConfig::from_config_file(&file).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.default_layer(), "aerial2016");
    }
}

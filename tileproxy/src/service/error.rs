//! Service error types.

use std::fmt;

use crate::config::ConfigFileError;
use crate::projection::ProjectionError;
use crate::provider::ProviderError;

/// Errors that can occur while building the service.
///
/// Per-request failures are [`TileError`](crate::pipeline::TileError)s.
#[derive(Debug)]
pub enum ServiceError {
    /// Failed to create HTTP client
    HttpClientError(ProviderError),
    /// Source projection could not be built
    ProjectionError(ProjectionError),
    /// Invalid configuration
    ConfigError(ConfigFileError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpClientError(e) => write!(f, "HTTP client error: {}", e),
            Self::ProjectionError(e) => write!(f, "Projection error: {}", e),
            Self::ConfigError(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClientError(e) => Some(e),
            Self::ProjectionError(e) => Some(e),
            Self::ConfigError(e) => Some(e),
        }
    }
}

impl From<ProviderError> for ServiceError {
    fn from(e: ProviderError) -> Self {
        Self::HttpClientError(e)
    }
}

impl From<ProjectionError> for ServiceError {
    fn from(e: ProjectionError) -> Self {
        Self::ProjectionError(e)
    }
}

impl From<ConfigFileError> for ServiceError {
    fn from(e: ConfigFileError) -> Self {
        Self::ConfigError(e)
    }
}

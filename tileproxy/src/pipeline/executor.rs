//! Executor abstraction for CPU-bound pipeline work.
//!
//! Decoding, stitching, resampling and PNG encoding are too heavy for async
//! worker threads. Stages hand that work to a [`BlockingExecutor`]; the
//! production implementation delegates to `tokio::task::spawn_blocking`.
//!
//! ```text
//! fetch stage ──► compose stage ──► crop stage
//!                      │                │
//!                      └──── BlockingExecutor ────► TokioExecutor (spawn_blocking)
//! ```

use std::future::Future;
use std::pin::Pin;

/// Trait for executing blocking (CPU-bound) work off the async runtime.
pub trait BlockingExecutor: Send + Sync + 'static {
    /// Executes a blocking closure on a thread pool.
    ///
    /// The closure runs on a dedicated thread pool to avoid blocking
    /// the async runtime's worker threads.
    fn execute_blocking<F, R>(
        &self,
        f: F,
    ) -> Pin<Box<dyn Future<Output = Result<R, ExecutorError>> + Send>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static;
}

/// Errors that can occur during executor operations.
#[derive(Debug, Clone)]
pub enum ExecutorError {
    /// A spawned task panicked or was cancelled
    TaskPanicked(String),
}

impl std::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorError::TaskPanicked(msg) => write!(f, "task panicked: {}", msg),
        }
    }
}

impl std::error::Error for ExecutorError {}

/// Tokio-based executor.
#[derive(Clone, Default)]
pub struct TokioExecutor;

impl TokioExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl BlockingExecutor for TokioExecutor {
    fn execute_blocking<F, R>(
        &self,
        f: F,
    ) -> Pin<Box<dyn Future<Output = Result<R, ExecutorError>> + Send>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        Box::pin(async move {
            tokio::task::spawn_blocking(f)
                .await
                .map_err(|e| ExecutorError::TaskPanicked(e.to_string()))
        })
    }
}

/// Synchronous executor for testing.
///
/// Executes "blocking" work immediately on the calling thread.
#[cfg(test)]
pub struct SyncExecutor;

#[cfg(test)]
impl BlockingExecutor for SyncExecutor {
    fn execute_blocking<F, R>(
        &self,
        f: F,
    ) -> Pin<Box<dyn Future<Output = Result<R, ExecutorError>> + Send>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let result = f();
        Box::pin(std::future::ready(Ok(result)))
    }
}

//! Error types for pool operations.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by the pool and its queue.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Construction or configuration input was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No resource became available within the configured wait.
    #[error("timed out after {0:?} waiting for a resource")]
    Timeout(Duration),
    /// The resource factory failed while the pool was being built.
    #[error("resource factory failed: {0}")]
    Factory(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// A push would exceed the fixed queue capacity.
    #[error("capacity exceeded: queue holds at most {capacity} items")]
    CapacityExceeded {
        /// Fixed capacity of the queue.
        capacity: usize,
    },
    /// The pool has been shut down.
    #[error("pool has been shut down")]
    Shutdown,
}

impl PoolError {
    /// Whether the caller may reasonably retry the operation.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;

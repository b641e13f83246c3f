//! Shareable handle that forwards calls through a pooled resource.
//!
//! Rather than intercepting arbitrary method names, the proxy exposes one
//! entry point, [`PoolProxy::invoke`], and lets callers define the method set
//! they want to forward as an ordinary trait on `PoolProxy<TheirResource>`:
//!
//! ```
//! use prometheus_resource_pool::core::{PoolOptions, PoolProxy, PoolError, ResourcePool};
//!
//! struct Conn;
//! impl Conn {
//!     fn ping(&self, n: u32) -> u32 { n + 1 }
//! }
//!
//! trait Ping {
//!     fn ping(&self, n: u32) -> Result<u32, PoolError>;
//! }
//!
//! impl Ping for PoolProxy<Conn> {
//!     fn ping(&self, n: u32) -> Result<u32, PoolError> {
//!         self.invoke(|conn| conn.ping(n))
//!     }
//! }
//!
//! let proxy = PoolProxy::new(ResourcePool::from_fn(PoolOptions::new(), || Conn).unwrap());
//! assert_eq!(Ping::ping(&proxy, 41).unwrap(), 42);
//! ```

use std::sync::Arc;

use crate::core::{PoolError, ResourcePool};

/// Cloneable front for a [`ResourcePool`]; every call checks a resource out
/// for exactly its own duration.
#[derive(Debug)]
pub struct PoolProxy<T> {
    pool: Arc<ResourcePool<T>>,
}

impl<T> Clone for PoolProxy<T> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
        }
    }
}

impl<T> PoolProxy<T> {
    /// Wrap a pool.
    #[must_use]
    pub fn new(pool: ResourcePool<T>) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Wrap a pool that is already shared.
    #[must_use]
    pub const fn from_shared(pool: Arc<ResourcePool<T>>) -> Self {
        Self { pool }
    }

    /// Call `op` on a checked-out resource. Equivalent to [`ResourcePool::with`].
    ///
    /// # Errors
    ///
    /// Returns the pool's checkout error; `op`'s own value is passed through.
    pub fn invoke<R, F>(&self, op: F) -> Result<R, PoolError>
    where
        F: FnOnce(&T) -> R,
    {
        self.pool.with(op)
    }

    /// Call a fallible `op` on a checked-out resource. Equivalent to
    /// [`ResourcePool::try_with`].
    ///
    /// # Errors
    ///
    /// Returns `op`'s error, or a converted `PoolError` if checkout failed.
    pub fn try_invoke<R, E, F>(&self, op: F) -> Result<R, E>
    where
        F: FnOnce(&T) -> Result<R, E>,
        E: From<PoolError>,
    {
        self.pool.try_with(op)
    }

    /// The underlying pool.
    #[must_use]
    pub fn pool(&self) -> &Arc<ResourcePool<T>> {
        &self.pool
    }
}

impl<T> From<ResourcePool<T>> for PoolProxy<T> {
    fn from(pool: ResourcePool<T>) -> Self {
        Self::new(pool)
    }
}

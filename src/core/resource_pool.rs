//! Fixed-size resource pool with thread-affine, reentrant checkout.
//!
//! The pool creates every resource up front and parks them in a
//! [`TimedQueue`]. A thread borrows one for the duration of a
//! [`ResourcePool::with`] call; nested calls on the same thread reuse the
//! resource the thread already holds instead of taking a second one.
//!
//! Each thread's lease carries a depth counter, so the resource only goes
//! back to the queue when the outermost `with` scope on that thread exits.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

use crate::core::{PoolError, TimedQueue};

/// Number of resources created when no size is configured.
pub const DEFAULT_POOL_SIZE: usize = 5;

/// Checkout wait used when no timeout is configured.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Construction options for a [`ResourcePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    /// Number of resources created eagerly at construction.
    pub size: usize,
    /// Maximum time a checkout waits for a free resource.
    pub timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_POOL_SIZE,
            timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }
}

impl PoolOptions {
    /// Options with the default size and timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of pooled resources.
    #[must_use]
    pub const fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the checkout timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Point-in-time view of where a pool's resources are.
///
/// A resource being handed between the queue and a thread is counted in
/// neither field, so `available + checked_out <= size`, with equality
/// whenever no hand-off is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Resources owned by the pool.
    pub size: usize,
    /// Resources waiting in the queue.
    pub available: usize,
    /// Resources held by threads.
    pub checked_out: usize,
}

/// A resource held by one thread, with its nesting depth.
struct Lease<T> {
    resource: Arc<T>,
    depth: usize,
}

/// Scoped checkout. Dropping it checks the resource back in, on normal
/// return and during unwinding alike.
struct CheckoutGuard<'a, T> {
    pool: &'a ResourcePool<T>,
    resource: Arc<T>,
}

impl<T> Deref for CheckoutGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.resource
    }
}

impl<T> Drop for CheckoutGuard<'_, T> {
    fn drop(&mut self) {
        self.pool.checkin();
    }
}

/// Pool of `size` pre-created resources shared by many threads.
///
/// Resources are handed to callers only inside [`with`](Self::with) and
/// [`try_with`](Self::try_with), which guarantees they come back.
///
/// # Examples
///
/// ```
/// use prometheus_resource_pool::core::{PoolOptions, ResourcePool};
/// use std::time::Duration;
///
/// let pool = ResourcePool::from_fn(
///     PoolOptions::new().with_size(2).with_timeout(Duration::from_secs(1)),
///     || String::from("connection"),
/// )
/// .unwrap();
///
/// let len = pool.with(|conn| conn.len()).unwrap();
/// assert_eq!(len, 10);
/// assert_eq!(pool.available(), 2);
/// ```
pub struct ResourcePool<T> {
    id: Uuid,
    options: PoolOptions,
    available: TimedQueue<Arc<T>>,
    /// Each thread only ever reads or writes its own entry.
    leases: Mutex<HashMap<ThreadId, Lease<T>>>,
}

impl<T> ResourcePool<T> {
    /// Build a pool, invoking `factory` exactly `options.size` times before returning.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidArgument` if `factory` is `None` or `options.size` is zero
    /// - `PoolError::Factory` if any factory call fails; resources created so
    ///   far are dropped and no pool is returned
    pub fn new<F, E>(options: PoolOptions, factory: Option<F>) -> Result<Self, PoolError>
    where
        F: FnMut() -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let Some(mut factory) = factory else {
            return Err(PoolError::InvalidArgument(
                "a resource factory is required".into(),
            ));
        };
        if options.size == 0 {
            return Err(PoolError::InvalidArgument(
                "pool size must be greater than 0".into(),
            ));
        }

        let id = Uuid::new_v4();
        let available = TimedQueue::new(options.size);
        for slot in 0..options.size {
            let resource = factory().map_err(|e| {
                let source: Box<dyn std::error::Error + Send + Sync> = e.into();
                error!(pool_id = %id, slot, error = %source, "resource factory failed");
                PoolError::Factory(source)
            })?;
            available.push(Arc::new(resource))?;
        }

        info!(
            pool_id = %id,
            size = options.size,
            timeout_ms = u64::try_from(options.timeout.as_millis()).unwrap_or(u64::MAX),
            "resource pool initialized"
        );

        Ok(Self {
            id,
            options,
            available,
            leases: Mutex::new(HashMap::with_capacity(options.size)),
        })
    }

    /// Build a pool from a factory that cannot fail.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::InvalidArgument` if `options.size` is zero.
    pub fn from_fn<F>(options: PoolOptions, mut factory: F) -> Result<Self, PoolError>
    where
        F: FnMut() -> T,
    {
        Self::new(
            options,
            Some(move || Ok::<_, std::convert::Infallible>(factory())),
        )
    }

    /// Run `op` with a checked-out resource and check it back in afterwards.
    ///
    /// If the calling thread already holds a resource from this pool (an
    /// enclosing `with`), `op` receives that same resource without blocking.
    /// The resource is released on every exit path, including a panic in `op`.
    /// Whatever `op` returns, including its own `Result`, is passed through
    /// untouched.
    ///
    /// # Errors
    ///
    /// - `PoolError::Timeout` if no resource freed up within the pool timeout;
    ///   `op` is not invoked
    /// - `PoolError::Shutdown` if the pool was shut down
    pub fn with<R, F>(&self, op: F) -> Result<R, PoolError>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.checkout()?;
        Ok(op(&guard))
    }

    /// Like [`with`](Self::with) for fallible operations: pool errors are
    /// converted into the caller's error type and `op`'s error is returned
    /// as-is after the resource has been released.
    ///
    /// # Errors
    ///
    /// Returns `op`'s error, or a converted `PoolError` if checkout failed.
    pub fn try_with<R, E, F>(&self, op: F) -> Result<R, E>
    where
        F: FnOnce(&T) -> Result<R, E>,
        E: From<PoolError>,
    {
        let guard = self.checkout()?;
        op(&guard)
    }

    fn checkout(&self) -> Result<CheckoutGuard<'_, T>, PoolError> {
        let thread = thread::current().id();

        {
            let mut leases = self.leases.lock();
            if let Some(lease) = leases.get_mut(&thread) {
                lease.depth += 1;
                trace!(pool_id = %self.id, depth = lease.depth, "reentrant checkout");
                return Ok(CheckoutGuard {
                    pool: self,
                    resource: Arc::clone(&lease.resource),
                });
            }
        }

        let resource = self
            .available
            .timed_pop(self.options.timeout)
            .inspect_err(|e| {
                if e.is_timeout() {
                    warn!(pool_id = %self.id, timeout = ?self.options.timeout, "checkout timed out");
                }
            })?;

        self.leases.lock().insert(
            thread,
            Lease {
                resource: Arc::clone(&resource),
                depth: 1,
            },
        );
        debug!(pool_id = %self.id, "resource checked out");

        Ok(CheckoutGuard {
            pool: self,
            resource,
        })
    }

    fn checkin(&self) {
        let thread = thread::current().id();

        let resource = {
            let mut leases = self.leases.lock();
            let Some(lease) = leases.get_mut(&thread) else {
                return;
            };
            if lease.depth > 1 {
                lease.depth -= 1;
                trace!(pool_id = %self.id, depth = lease.depth, "reentrant checkin");
                return;
            }
            match leases.remove(&thread) {
                Some(lease) => lease.resource,
                None => return,
            }
        };

        // Pushes never exceed capacity: only resources popped earlier come back.
        if let Err(err) = self.available.push(resource) {
            error!(pool_id = %self.id, error = %err, "failed to return resource to pool");
            return;
        }
        debug!(pool_id = %self.id, "resource checked in");
    }

    /// Unique identity of this pool, used in log fields.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Number of resources owned by the pool.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.options.size
    }

    /// Maximum time a checkout waits for a free resource.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.options.timeout
    }

    /// Resources currently waiting in the queue.
    pub fn available(&self) -> usize {
        self.available.len()
    }

    /// Resources currently held by threads.
    pub fn checked_out(&self) -> usize {
        self.leases.lock().len()
    }

    /// Consistent snapshot of queued and held resources.
    pub fn stats(&self) -> PoolStats {
        // Leases before queue state; no path takes them in the other order.
        let leases = self.leases.lock();
        PoolStats {
            size: self.options.size,
            available: self.available.len(),
            checked_out: leases.len(),
        }
    }

    /// Whether the calling thread currently holds a resource from this pool.
    pub fn held_by_current_thread(&self) -> bool {
        self.leases.lock().contains_key(&thread::current().id())
    }
}

impl<T> ResourcePool<T>
where
    T: Send + Sync + 'static,
{
    /// Shut the pool down, passing every idle resource to `closer`.
    ///
    /// Resources still checked out are passed to `closer` when their holder
    /// releases them. New checkouts fail with `PoolError::Shutdown`;
    /// reentrant checkouts by a thread that already holds a resource still
    /// succeed until that thread's outermost scope exits.
    ///
    /// `closer` runs outside the pool's locks: it may read pool state such as
    /// [`available`](Self::available), and other threads keep working while
    /// it tears resources down. It must not call `shutdown` again.
    pub fn shutdown<F>(&self, mut closer: F)
    where
        F: FnMut(&T) + Send + 'static,
    {
        info!(pool_id = %self.id, idle = self.available(), "shutting down resource pool");
        self.available.shutdown(move |resource: Arc<T>| closer(&resource));
    }
}

impl<T> fmt::Debug for ResourcePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("id", &self.id)
            .field("size", &self.options.size)
            .field("timeout", &self.options.timeout)
            .field("available", &self.available.len())
            .finish_non_exhaustive()
    }
}

//! # Prometheus Resource Pool
//!
//! Bounded, thread-affine sharing of expensive resources such as network
//! connections.
//!
//! A [`ResourcePool`](core::ResourcePool) creates a fixed number of resources
//! up front and lends them to threads for the duration of a closure. Threads
//! that cannot get one wait on a condition variable for at most the configured
//! timeout, then fail with [`PoolError::Timeout`](core::PoolError::Timeout).
//!
//! ## Key Features
//!
//! - **Eager creation**: the factory runs exactly `size` times, during construction
//! - **Timed checkout**: waiting is bounded by a per-pool timeout
//! - **Thread affinity**: nested `with` calls on one thread reuse its resource
//!   without blocking, and only the outermost scope returns it
//! - **Guaranteed release**: resources come back on return, error, and panic
//! - **Proxy**: [`PoolProxy`](core::PoolProxy) forwards caller-defined
//!   operations through the pool
//!
//! ```
//! use prometheus_resource_pool::core::{PoolOptions, ResourcePool};
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//!
//! let pool = Arc::new(
//!     ResourcePool::from_fn(
//!         PoolOptions::new().with_size(2).with_timeout(Duration::from_secs(1)),
//!         || vec![0_u8; 16],
//!     )
//!     .unwrap(),
//! );
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let pool = Arc::clone(&pool);
//!         thread::spawn(move || pool.with(|buf| buf.len()).unwrap())
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), 16);
//! }
//! assert_eq!(pool.available(), 2);
//! ```
//!
//! For complete examples, see:
//! - `tests/resource_pool_test.rs` - concurrency and timing scenarios
//! - `tests/proxy_test.rs` - forwarding through a proxy

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core pooling primitives and error types.
pub mod core;
/// Configuration models for pools and timeouts.
pub mod config;
/// Builders to construct pools from configuration.
pub mod builders;
/// Shared utilities.
pub mod util;

//! Core pooling primitives: the timed queue, the resource pool, and its proxy.

pub mod error;
pub mod proxy;
pub mod resource_pool;
pub mod timed_queue;

pub use error::{AppResult, PoolError};
pub use proxy::PoolProxy;
pub use resource_pool::{
    PoolOptions, PoolStats, ResourcePool, DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_POOL_SIZE,
};
pub use timed_queue::TimedQueue;

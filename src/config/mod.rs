//! Configuration models for pools and timeouts.

pub mod pool;

pub use pool::{PoolConfig, PoolSetConfig, ENV_POOL_SIZE, ENV_POOL_TIMEOUT_SECS};

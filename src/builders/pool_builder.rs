//! Builders to construct resource pools from configuration.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{PoolConfig, PoolSetConfig};
use crate::core::{PoolError, PoolProxy, ResourcePool};

/// Named pool configuration ready to be turned into a [`ResourcePool`].
#[derive(Debug, Clone)]
pub struct PoolBuilder {
    name: String,
    config: PoolConfig,
}

impl PoolBuilder {
    /// Start a builder for the pool `name`.
    pub fn new(name: impl Into<String>, config: PoolConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Pool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pool configuration.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Validate the configuration and eagerly create the pool's resources.
    ///
    /// # Errors
    ///
    /// - `PoolError::InvalidArgument` if the configuration is invalid
    /// - `PoolError::Factory` if `factory` fails
    pub fn build<T, F, E>(&self, factory: F) -> Result<ResourcePool<T>, PoolError>
    where
        F: FnMut() -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let options = self
            .config
            .options()
            .map_err(|e| PoolError::InvalidArgument(format!("pool `{}` invalid: {e}", self.name)))?;
        debug!(pool = %self.name, size = options.size, "building resource pool");
        ResourcePool::new(options, Some(factory))
    }

    /// Build the pool and wrap it in a [`PoolProxy`].
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_proxy<T, F, E>(&self, factory: F) -> Result<PoolProxy<T>, PoolError>
    where
        F: FnMut() -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.build(factory).map(PoolProxy::new)
    }
}

/// Build every pool in `cfg`. `factory` receives the pool name and is called
/// once per resource.
///
/// # Errors
///
/// Fails on the first invalid configuration or factory error; pools built
/// before the failure are dropped.
pub fn build_pools<T, F, E>(
    cfg: &PoolSetConfig,
    mut factory: F,
) -> Result<HashMap<String, ResourcePool<T>>, PoolError>
where
    F: FnMut(&str) -> Result<T, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    cfg.validate()
        .map_err(|e| PoolError::InvalidArgument(format!("config invalid: {e}")))?;

    let mut pools = HashMap::with_capacity(cfg.pools.len());
    for (name, pool_cfg) in &cfg.pools {
        let pool = PoolBuilder::new(name.as_str(), pool_cfg.clone()).build(|| factory(name))?;
        pools.insert(name.clone(), pool);
    }

    Ok(pools)
}

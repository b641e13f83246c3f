//! Pool configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{PoolOptions, DEFAULT_CHECKOUT_TIMEOUT, DEFAULT_POOL_SIZE};

/// Environment variable holding the pool size.
pub const ENV_POOL_SIZE: &str = "POOL_SIZE";
/// Environment variable holding the checkout timeout in seconds.
pub const ENV_POOL_TIMEOUT_SECS: &str = "POOL_TIMEOUT_SECS";

const fn default_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_timeout_secs() -> f64 {
    DEFAULT_CHECKOUT_TIMEOUT.as_secs_f64()
}

/// Pool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of resources created eagerly.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Maximum checkout wait in seconds; fractions allowed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Named pool configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSetConfig {
    /// Map of pool name to configuration.
    pub pools: HashMap<String, PoolConfig>,
}

impl PoolConfig {
    /// Validate pool configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.size == 0 {
            return Err("size must be greater than 0".into());
        }
        if !self.timeout_secs.is_finite() || self.timeout_secs < 0.0 {
            return Err(format!(
                "timeout_secs must be a non-negative number, got {}",
                self.timeout_secs
            ));
        }
        Duration::try_from_secs_f64(self.timeout_secs)
            .map_err(|e| format!("timeout_secs out of range: {e}"))?;
        Ok(())
    }

    /// Checkout timeout as a `Duration`.
    pub fn timeout(&self) -> Result<Duration, String> {
        self.validate()?;
        Duration::try_from_secs_f64(self.timeout_secs)
            .map_err(|e| format!("timeout_secs out of range: {e}"))
    }

    /// Validate and convert into pool construction options.
    pub fn options(&self) -> Result<PoolOptions, String> {
        Ok(PoolOptions::new()
            .with_size(self.size)
            .with_timeout(self.timeout()?))
    }

    /// Parse pool configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read `POOL_SIZE` and `POOL_TIMEOUT_SECS`, loading a `.env` file first
    /// if one exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_POOL_SIZE) {
            cfg.size = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_POOL_SIZE}={raw:?}: {e}"))?;
        }
        if let Some(raw) = lookup(ENV_POOL_TIMEOUT_SECS) {
            cfg.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_POOL_TIMEOUT_SECS}={raw:?}: {e}"))?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

impl PoolSetConfig {
    /// Validate all pools and ensure at least one pool exists.
    pub fn validate(&self) -> Result<(), String> {
        if self.pools.is_empty() {
            return Err("at least one pool must be defined".into());
        }
        for (name, pool) in &self.pools {
            pool.validate()
                .map_err(|e| format!("pool `{name}` invalid: {e}"))?;
        }
        Ok(())
    }

    /// Parse pool set configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

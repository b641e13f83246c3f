//! Tests for builder modules

use prometheus_resource_pool::builders::{build_pools, PoolBuilder};
use prometheus_resource_pool::config::{PoolConfig, PoolSetConfig};
use prometheus_resource_pool::core::PoolError;
use std::collections::HashMap;
use std::time::Duration;

#[test]
fn test_pool_builder_accessors() {
    let config = PoolConfig {
        size: 3,
        timeout_secs: 0.5,
    };

    let builder = PoolBuilder::new("pool1", config);
    assert_eq!(builder.name(), "pool1");
    assert_eq!(builder.config().size, 3);
}

#[test]
fn test_pool_builder_builds_configured_pool() {
    let builder = PoolBuilder::new(
        "pool1",
        PoolConfig {
            size: 3,
            timeout_secs: 0.5,
        },
    );

    let pool = builder.build(|| Ok::<_, PoolError>("conn")).unwrap();
    assert_eq!(pool.size(), 3);
    assert_eq!(pool.timeout(), Duration::from_millis(500));
    assert_eq!(pool.available(), 3);
}

#[test]
fn test_pool_builder_rejects_invalid_config() {
    let builder = PoolBuilder::new(
        "broken",
        PoolConfig {
            size: 0,
            timeout_secs: 1.0,
        },
    );

    let err = builder.build(|| Ok::<_, PoolError>(())).unwrap_err();
    match err {
        PoolError::InvalidArgument(msg) => assert!(msg.contains("pool `broken`"), "{msg}"),
        other => panic!("expected invalid argument, got {other:?}"),
    }
}

#[test]
fn test_build_pools_creates_every_named_pool() {
    let mut pools = HashMap::new();
    pools.insert("primary".to_string(), PoolConfig { size: 2, timeout_secs: 1.0 });
    pools.insert("replica".to_string(), PoolConfig { size: 3, timeout_secs: 1.0 });
    let cfg = PoolSetConfig { pools };

    let mut created = Vec::new();
    let built = build_pools(&cfg, |name| {
        created.push(name.to_string());
        Ok::<_, PoolError>(name.to_string())
    })
    .unwrap();

    assert_eq!(built["primary"].size(), 2);
    assert_eq!(built["replica"].size(), 3);
    assert_eq!(created.len(), 5);
    assert_eq!(built["replica"].with(|conn| conn.clone()).unwrap(), "replica");
}

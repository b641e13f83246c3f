//! Tests for configuration validation

use prometheus_resource_pool::config::{PoolConfig, PoolSetConfig};
use std::time::Duration;

#[test]
fn test_pool_config_validation() {
    let valid = PoolConfig {
        size: 10,
        timeout_secs: 2.5,
    };
    assert!(valid.validate().is_ok());
}

#[test]
fn test_pool_config_invalid_size() {
    let invalid = PoolConfig {
        size: 0,
        timeout_secs: 5.0,
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_pool_config_invalid_timeout() {
    for timeout_secs in [-1.0, f64::NAN, f64::INFINITY] {
        let invalid = PoolConfig {
            size: 1,
            timeout_secs,
        };
        assert!(invalid.validate().is_err(), "accepted {timeout_secs}");
    }
}

#[test]
fn test_pool_config_zero_timeout_is_allowed() {
    let cfg = PoolConfig {
        size: 1,
        timeout_secs: 0.0,
    };
    assert_eq!(cfg.timeout().unwrap(), Duration::ZERO);
}

#[test]
fn test_pool_config_from_json_applies_defaults() {
    let cfg = PoolConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PoolConfig::default());
    assert_eq!(cfg.size, 5);

    let cfg = PoolConfig::from_json_str(r#"{"size": 2, "timeout_secs": 0.1}"#).unwrap();
    assert_eq!(cfg.size, 2);
    assert_eq!(cfg.timeout().unwrap(), Duration::from_millis(100));
}

#[test]
fn test_pool_config_from_json_rejects_invalid() {
    assert!(PoolConfig::from_json_str(r#"{"size": 0}"#).is_err());
    assert!(PoolConfig::from_json_str("not json").is_err());
}

#[test]
fn test_pool_set_config_validation() {
    let mut pools = std::collections::HashMap::new();
    pools.insert("primary".to_string(), PoolConfig::default());

    let config = PoolSetConfig { pools };
    assert!(config.validate().is_ok());
}

#[test]
fn test_pool_set_config_empty_pools() {
    let config = PoolSetConfig {
        pools: std::collections::HashMap::new(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_pool_set_config_from_json() {
    let json = r#"{
        "pools": {
            "primary": { "size": 8, "timeout_secs": 2 },
            "replica": { "size": 0 }
        }
    }"#;

    let err = PoolSetConfig::from_json_str(json).unwrap_err();
    assert!(err.contains("pool `replica` invalid"), "{err}");

    let json = r#"{ "pools": { "primary": { "size": 8, "timeout_secs": 2 } } }"#;
    let config = PoolSetConfig::from_json_str(json).unwrap();
    assert_eq!(config.pools["primary"].size, 8);
}

#[test]
fn test_pool_config_from_env() {
    // Only this test touches these variables.
    std::env::set_var("POOL_SIZE", "7");
    std::env::set_var("POOL_TIMEOUT_SECS", "0.25");
    let cfg = PoolConfig::from_env();
    std::env::remove_var("POOL_SIZE");
    std::env::remove_var("POOL_TIMEOUT_SECS");

    let cfg = cfg.unwrap();
    assert_eq!(cfg.size, 7);
    assert_eq!(cfg.timeout().unwrap(), Duration::from_millis(250));
}

//! Tests for error types

use prometheus_resource_pool::core::PoolError;
use std::time::Duration;

#[test]
fn test_invalid_argument_error() {
    let err = PoolError::InvalidArgument("a resource factory is required".to_string());
    assert_eq!(format!("{}", err), "invalid argument: a resource factory is required");
}

#[test]
fn test_timeout_error() {
    let err = PoolError::Timeout(Duration::from_millis(100));
    assert_eq!(format!("{}", err), "timed out after 100ms waiting for a resource");
    assert!(err.is_timeout());
}

#[test]
fn test_capacity_exceeded_error() {
    let err = PoolError::CapacityExceeded { capacity: 5 };
    assert_eq!(format!("{}", err), "capacity exceeded: queue holds at most 5 items");
}

#[test]
fn test_shutdown_error() {
    let err = PoolError::Shutdown;
    assert_eq!(format!("{}", err), "pool has been shut down");
}

#[test]
fn test_pool_error_converts_into_anyhow() {
    fn checkout() -> prometheus_resource_pool::core::AppResult<()> {
        Err::<(), _>(PoolError::Timeout(Duration::from_secs(5)))?;
        Ok(())
    }

    let err = checkout().unwrap_err();
    assert!(err.downcast_ref::<PoolError>().is_some_and(PoolError::is_timeout));
}

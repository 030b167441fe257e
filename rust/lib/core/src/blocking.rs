//! Bounded execution of synchronous storage calls from async handlers.

use std::time::Duration;

use tracing::{error, warn};

use crate::ServiceError;

/// Run a blocking storage operation on tokio's blocking pool, giving up
/// after `timeout`.
///
/// A timeout is reported as `StorageUnavailable` so callers never hang on a
/// wedged backend. The abandoned closure still runs to completion in the
/// background; store operations are idempotent so that is harmless.
pub async fn run_blocking<T, F>(timeout: Duration, op: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(op);
    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => {
            error!("storage task failed: {}", join_err);
            Err(ServiceError::Internal(format!("storage task failed: {}", join_err)))
        }
        Err(_) => {
            warn!("storage operation timed out after {:?}", timeout);
            Err(ServiceError::StorageUnavailable(format!(
                "storage operation timed out after {}ms",
                timeout.as_millis()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_the_operation_result() {
        let v = run_blocking(Duration::from_secs(1), || Ok(41 + 1)).await.unwrap();
        assert_eq!(v, 42);

        let err = run_blocking::<(), _>(Duration::from_secs(1), || {
            Err(ServiceError::BadRequest("nope".into()))
        })
        .await
        .unwrap_err();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn slow_operation_is_storage_unavailable() {
        let err = run_blocking(Duration::from_millis(20), || {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        })
        .await
        .unwrap_err();
        assert_eq!(err.error_code(), "STORAGE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn panicking_operation_is_internal() {
        let err = run_blocking::<(), _>(Duration::from_secs(1), || panic!("boom"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL");
    }
}

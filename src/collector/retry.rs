//! Retry loop for timeout-class failures.

use crate::config::RetryConfig;
use crate::core::{Error, Result};
use std::future::Future;

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is spent.
///
/// Errors for which `is_retryable` returns false are returned immediately.
/// Between attempts the task sleeps for the configured backoff delay.
pub async fn retry_async<T, F, Fut>(
    config: &RetryConfig,
    label: &str,
    is_retryable: impl Fn(&Error) -> bool,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if is_retryable(&e) && config.should_retry(attempt) => {
                let wait = config.delay_for_attempt(attempt);
                log::warn!(
                    "{}: attempt {}/{} timed out, retrying in {:?}: {}",
                    label,
                    attempt,
                    config.max_attempts,
                    wait,
                    e
                );
                tokio::time::sleep(wait).await;
            }
            Err(e) => {
                if is_retryable(&e) {
                    log::error!("{}: giving up after {} attempts", label, attempt);
                }
                return Err(e);
            }
        }
    }
}

/// Retry only request timeouts.
pub async fn retry_on_timeout<T, F, Fut>(config: &RetryConfig, label: &str, op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_async(config, label, Error::is_timeout, op).await
}

//! Caller-side retry policy.
//!
//! The content client itself never retries; retry is caller policy so page
//! renderers can choose to degrade instead of wait. The binaries wrap their
//! calls in [`with_retry_if`] and skip retrying errors that cannot succeed
//! on a second attempt, like validation failures.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Exponential-backoff schedule.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one. Must be >= 1.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Interactive content fetches: 3 attempts, 1s then 2s.
    pub fn api_call() -> Self {
        Self::new(3, Duration::from_secs(1)).with_max_delay(Duration::from_secs(5))
    }

    /// Sitemap build job: the build can afford to wait a little longer
    /// before degrading to static-only output. 4 attempts, up to 8s apart.
    pub fn crawl_index() -> Self {
        Self::new(4, Duration::from_secs(1)).with_max_delay(Duration::from_secs(8))
    }

    // Backoff for a 0-indexed attempt; the first attempt runs immediately.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::api_call()
    }
}

/// Drive `operation` until it succeeds or the schedule is exhausted.
///
/// # Panics
/// Panics if `config.max_attempts` is 0 (a misconfigured call site).
pub async fn with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    with_retry_if(config, operation_name, operation, |_| true).await
}

/// Like [`with_retry`], but gives up immediately when `should_retry` says an
/// error is terminal (bad input, missing entity).
///
/// # Panics
/// Panics if `config.max_attempts` is 0.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    assert!(
        config.max_attempts >= 1,
        "RetryConfig.max_attempts must be >= 1"
    );

    let mut last_error: Option<E> = None;

    for attempt in 0..config.max_attempts {
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: attempt {}/{} after {:?}",
                operation_name,
                attempt + 1,
                config.max_attempts,
                delay
            );
            sleep(delay).await;
        }

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(
                        "{}: recovered on attempt {}/{}",
                        operation_name,
                        attempt + 1,
                        config.max_attempts
                    );
                }
                return Ok(result);
            }
            Err(err) => {
                if !should_retry(&err) {
                    debug!("{}: terminal error, not retrying: {}", operation_name, err);
                    return Err(err);
                }

                let remaining = config.max_attempts - attempt - 1;
                if remaining > 0 {
                    warn!(
                        "{}: attempt {}/{} failed ({}), {} left",
                        operation_name,
                        attempt + 1,
                        config.max_attempts,
                        err,
                        remaining
                    );
                } else {
                    warn!(
                        "{}: giving up after {} attempts: {}",
                        operation_name, config.max_attempts, err
                    );
                }
                last_error = Some(err);
            }
        }
    }

    Err(last_error.expect("at least one attempt was made"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_delay_schedule_doubles_up_to_max() {
        let config = RetryConfig::new(6, Duration::from_secs(1)).with_max_delay(Duration::from_secs(3));

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(3));
        assert_eq!(config.delay_for_attempt(4), Duration::from_secs(3));
    }

    #[test]
    fn test_presets() {
        assert_eq!(RetryConfig::api_call().max_attempts, 3);
        assert_eq!(RetryConfig::crawl_index().max_attempts, 4);
        assert_eq!(RetryConfig::default().max_attempts, 3);
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, &str> =
            with_retry(&RetryConfig::new(3, Duration::from_millis(1)), "op", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, &str> =
            with_retry(&RetryConfig::new(3, Duration::from_millis(1)), "op", || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("transient")
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_exhausted_schedule_returns_last_error() {
        let result: Result<u32, &str> = tokio_test::block_on(with_retry(
            &RetryConfig::new(2, Duration::from_millis(1)),
            "op",
            || async { Err("still down") },
        ));

        assert_eq!(result.unwrap_err(), "still down");
    }

    #[tokio::test]
    async fn test_terminal_error_short_circuits() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, &str> = with_retry_if(
            &RetryConfig::new(5, Duration::from_millis(1)),
            "op",
            || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err("bad input")
                }
            },
            |err: &&str| !err.contains("bad input"),
        )
        .await;

        assert_eq!(result.unwrap_err(), "bad input");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

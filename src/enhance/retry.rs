//! Retry enhancement with exponential backoff.

use std::time::Duration;

use futures::future::BoxFuture;
use tracing::warn;

use super::{Operation, SharedOperation};
use crate::error::Result;

// == Retry Config ==
/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt; total attempts is `max_retries + 1`
    pub max_retries: u32,
    /// Wait before the first retry
    pub delay: Duration,
    /// Growth factor applied per attempt
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self {
            max_retries,
            delay,
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Wait after the failed attempt number `attempt` (0-indexed).
    ///
    /// `delay * backoff_multiplier^attempt`, saturating at `Duration::MAX`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

// == Retry Layer ==
/// Re-invokes the inner operation until it succeeds or attempts run out.
///
/// Every error is retried the same way. When the last attempt fails its
/// error is returned as-is.
pub struct WithRetry<A, R> {
    inner: SharedOperation<A, R>,
    config: RetryConfig,
}

impl<A, R> WithRetry<A, R> {
    pub fn new(inner: SharedOperation<A, R>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

impl<A, R> Operation<A, R> for WithRetry<A, R>
where
    A: Clone + Send + 'static,
    R: Send + 'static,
{
    fn call(&self, args: A) -> BoxFuture<'_, Result<R>> {
        Box::pin(async move {
            let mut attempt = 0;
            loop {
                match self.inner.call(args.clone()).await {
                    Ok(value) => return Ok(value),
                    Err(err) if attempt >= self.config.max_retries => return Err(err),
                    Err(err) => {
                        let wait = self.config.delay_for(attempt);
                        warn!(
                            attempt = attempt + 1,
                            max_attempts = self.config.max_retries + 1,
                            error = %err,
                            "Attempt failed, retrying in {:?}",
                            wait
                        );
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                    }
                }
            }
        })
    }
}

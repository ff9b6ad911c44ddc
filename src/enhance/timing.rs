//! Timing enhancement.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use futures::future::BoxFuture;
use tracing::info;

use super::{Operation, SharedOperation};
use crate::error::Result;

/// Sink for timing lines.
pub type Logger = Arc<dyn Fn(&str) + Send + Sync>;

// == Timing Config ==
#[derive(Clone)]
pub struct TimingConfig {
    pub label: String,
    pub logger: Logger,
}

impl TimingConfig {
    /// Logs through `tracing` at info level.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            logger: Arc::new(|message: &str| info!("{message}")),
        }
    }

    pub fn with_logger(mut self, logger: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new("Function")
    }
}

impl fmt::Debug for TimingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimingConfig")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

// == Timing Layer ==
/// Emits `"<label> took <ms>ms"` once per call, success or failure.
pub struct WithTiming<A, R> {
    inner: SharedOperation<A, R>,
    config: TimingConfig,
}

impl<A, R> WithTiming<A, R> {
    pub fn new(inner: SharedOperation<A, R>, config: TimingConfig) -> Self {
        Self { inner, config }
    }
}

impl<A, R> Operation<A, R> for WithTiming<A, R>
where
    A: Send + 'static,
    R: Send + 'static,
{
    fn call(&self, args: A) -> BoxFuture<'_, Result<R>> {
        Box::pin(async move {
            let start = Instant::now();
            let result = self.inner.call(args).await;
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            (self.config.logger)(&format!("{} took {:.2}ms", self.config.label, elapsed_ms));
            result
        })
    }
}

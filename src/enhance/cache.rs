//! Cache enhancement.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;
use tracing::debug;

use super::{Operation, SharedOperation};
use crate::cache::TtlCache;
use crate::error::Result;

/// Derives the cache key for a call from its arguments.
pub type KeyGenerator<A> = Arc<dyn Fn(&A) -> String + Send + Sync>;

/// JSON rendering of the arguments.
pub fn default_cache_key<A: Serialize>(args: &A) -> String {
    serde_json::to_string(args).unwrap_or_default()
}

// == Cache Config ==
/// Storage and key derivation for the cache layer.
pub struct CacheConfig<A, R> {
    pub cache: TtlCache<R>,
    pub key_generator: KeyGenerator<A>,
}

impl<A, R> CacheConfig<A, R>
where
    A: Serialize + 'static,
{
    /// Keys calls by the JSON form of their arguments.
    pub fn new(cache: TtlCache<R>) -> Self {
        Self {
            cache,
            key_generator: Arc::new(default_cache_key::<A>),
        }
    }
}

impl<A, R> CacheConfig<A, R> {
    pub fn with_key_generator(
        mut self,
        key_generator: impl Fn(&A) -> String + Send + Sync + 'static,
    ) -> Self {
        self.key_generator = Arc::new(key_generator);
        self
    }
}

// == Cache Layer ==
/// Serves fresh cached results and stores successful inner results.
///
/// The cache lock is not held while the inner operation runs, so concurrent
/// misses on the same key each call through.
pub struct WithCache<A, R> {
    inner: SharedOperation<A, R>,
    cache: TtlCache<R>,
    key_generator: KeyGenerator<A>,
}

impl<A, R> WithCache<A, R> {
    pub fn new(inner: SharedOperation<A, R>, config: CacheConfig<A, R>) -> Self {
        Self {
            inner,
            cache: config.cache,
            key_generator: config.key_generator,
        }
    }
}

impl<A, R> Operation<A, R> for WithCache<A, R>
where
    A: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    fn call(&self, args: A) -> BoxFuture<'_, Result<R>> {
        Box::pin(async move {
            let key = (self.key_generator)(&args);

            if let Some(hit) = self.cache.get(&key).await {
                debug!(%key, "Cache hit");
                return Ok(hit);
            }

            debug!(%key, "Cache miss, fetching fresh data");
            let result = self.inner.call(args).await?;
            self.cache.insert(key, result.clone()).await;

            Ok(result)
        })
    }
}

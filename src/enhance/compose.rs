//! Composition of the request enhancements.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    shared, CacheConfig, Operation, RetryConfig, SharedOperation, TimingConfig, UrlArgs,
    WithBaseUrl, WithCache, WithRetry, WithTiming,
};
use crate::cache::TtlCache;
use crate::client::HttpClient;
use crate::error::{AppError, Result};

/// Suggested TTL for the cache handed to [`api_client`].
pub const API_CLIENT_CACHE_TTL: Duration = Duration::from_secs(60);

// == Enhancement Options ==
/// Which layers to apply; unset layers are skipped.
pub struct EnhancementOptions<A, R> {
    pub base_url: Option<String>,
    pub retry: Option<RetryConfig>,
    pub cache: Option<CacheConfig<A, R>>,
    pub timing: Option<TimingConfig>,
}

impl<A, R> Default for EnhancementOptions<A, R> {
    fn default() -> Self {
        Self {
            base_url: None,
            retry: None,
            cache: None,
            timing: None,
        }
    }
}

impl<A, R> EnhancementOptions<A, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig<A, R>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Fills every unset layer from `defaults`; layers set here win.
    pub fn or_defaults(self, defaults: Self) -> Self {
        Self {
            base_url: self.base_url.or(defaults.base_url),
            retry: self.retry.or(defaults.retry),
            cache: self.cache.or(defaults.cache),
            timing: self.timing.or(defaults.timing),
        }
    }
}

// == Compose ==
/// Wraps `op` in the configured layers.
///
/// Order, innermost first: base URL, retry, cache, timing. Retries run
/// beneath the cache so only the final successful result is stored, and
/// timing covers hits and misses alike.
pub fn with_request_enhancements<A, R, O>(
    op: O,
    mut options: EnhancementOptions<A, R>,
) -> SharedOperation<A, R>
where
    O: Operation<A, R> + 'static,
    A: UrlArgs + Clone + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    let mut enhanced = shared(op);
    if let Some(base_url) = options.base_url.take() {
        enhanced = Arc::new(WithBaseUrl::new(base_url, enhanced));
    }
    layer(enhanced, options)
}

/// [`with_request_enhancements`] for operations whose arguments carry no URL.
///
/// Retry, cache and timing apply as usual. A set `base_url` has nothing to
/// prefix and is rejected with [`AppError::Internal`].
pub fn with_enhancements<A, R, O>(
    op: O,
    options: EnhancementOptions<A, R>,
) -> Result<SharedOperation<A, R>>
where
    O: Operation<A, R> + 'static,
    A: Clone + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    if options.base_url.is_some() {
        return Err(AppError::Internal(
            "base_url requires URL-carrying arguments".to_string(),
        ));
    }
    Ok(layer(shared(op), options))
}

/// Applies retry, cache and timing in that order. `base_url` is ignored here.
fn layer<A, R>(
    mut enhanced: SharedOperation<A, R>,
    options: EnhancementOptions<A, R>,
) -> SharedOperation<A, R>
where
    A: Clone + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    if let Some(retry) = options.retry {
        enhanced = Arc::new(WithRetry::new(enhanced, retry));
    }
    if let Some(cache) = options.cache {
        enhanced = Arc::new(WithCache::new(enhanced, cache));
    }
    if let Some(timing) = options.timing {
        enhanced = Arc::new(WithTiming::new(enhanced, timing));
    }

    enhanced
}

/// JSON GET client over `base_url`.
///
/// Defaults: two retries starting at one second, the given cache, and
/// `"API Request"` timing. Any layer set in `overrides` replaces its
/// default, including the base URL.
pub fn api_client<R>(
    client: &HttpClient,
    base_url: impl Into<String>,
    cache: TtlCache<R>,
    overrides: EnhancementOptions<String, R>,
) -> SharedOperation<String, R>
where
    R: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let defaults = EnhancementOptions::new()
        .with_base_url(base_url)
        .with_retry(RetryConfig::new(2, Duration::from_millis(1000)))
        .with_cache(CacheConfig::new(cache))
        .with_timing(TimingConfig::new("API Request"));

    with_request_enhancements(
        client.json_operation::<R>(),
        overrides.or_defaults(defaults),
    )
}

/// Memoizes `op` in `cache`, keyed by the JSON form of its arguments.
pub fn cached<A, R, O>(op: O, cache: TtlCache<R>) -> SharedOperation<A, R>
where
    O: Operation<A, R> + 'static,
    A: Serialize + Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    Arc::new(WithCache::new(shared(op), CacheConfig::new(cache)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Records every URL it receives and fails the first `failures` calls.
    fn recording(
        failures: u32,
        seen: Arc<Mutex<Vec<String>>>,
    ) -> impl Operation<String, String> + 'static {
        move |url: String| {
            let mut seen = seen.lock().unwrap();
            seen.push(url.clone());
            let fail = (seen.len() as u32) <= failures;
            async move {
                if fail {
                    Err(AppError::Status(503))
                } else {
                    Ok::<_, AppError>(url)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_no_options_is_passthrough() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let op = with_request_enhancements(recording(0, seen.clone()), EnhancementOptions::new());

        assert_eq!(op.call("/posts".to_string()).await.unwrap(), "/posts");
    }

    #[tokio::test]
    async fn test_all_layers_compose() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let timings = Arc::new(AtomicU32::new(0));
        let timing_count = timings.clone();
        let cache = TtlCache::new(Duration::from_secs(60));

        let op = with_request_enhancements(
            recording(1, seen.clone()),
            EnhancementOptions::new()
                .with_base_url("https://api.example.com")
                .with_retry(RetryConfig::new(2, Duration::from_millis(1)))
                .with_cache(CacheConfig::new(cache.clone()))
                .with_timing(TimingConfig::new("test").with_logger(move |_| {
                    timing_count.fetch_add(1, Ordering::SeqCst);
                })),
        );

        let first = op.call("/posts".to_string()).await.unwrap();
        let second = op.call("/posts".to_string()).await.unwrap();

        assert_eq!(first, "https://api.example.com/posts");
        assert_eq!(second, first);

        // One failure plus one success, then a cache hit
        assert_eq!(seen.lock().unwrap().len(), 2);
        // Timing wraps hits and misses
        assert_eq!(timings.load(Ordering::SeqCst), 2);
        // The retried result is stored once, keyed by the relative path
        assert_eq!(cache.len().await, 1);
        assert!(cache.contains(r#""/posts""#).await);
    }

    #[tokio::test]
    async fn test_retry_exhaustion_leaves_cache_empty() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));

        let op = with_request_enhancements(
            recording(u32::MAX, seen.clone()),
            EnhancementOptions::new()
                .with_retry(RetryConfig::new(3, Duration::from_millis(1)))
                .with_cache(CacheConfig::new(cache.clone())),
        );

        assert!(op.call("/posts".to_string()).await.is_err());
        assert_eq!(seen.lock().unwrap().len(), 4);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_api_client_fetches_once_per_ttl() {
        use axum::{routing::get, Json, Router};
        use serde_json::{json, Value};

        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/posts",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Json(json!([{"id": 1}, {"id": 2}])) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let cache: TtlCache<Vec<Value>> = TtlCache::new(API_CLIENT_CACHE_TTL);
        let client = api_client(
            &HttpClient::new(),
            format!("http://{addr}"),
            cache.clone(),
            EnhancementOptions::new(),
        );

        assert_eq!(client.call("/posts".to_string()).await.unwrap().len(), 2);
        assert_eq!(client.call("/posts".to_string()).await.unwrap().len(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_api_client_overrides_replace_defaults() {
        use axum::{http::StatusCode, routing::get, Router};
        use serde_json::Value;

        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/posts",
            get(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { StatusCode::SERVICE_UNAVAILABLE }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let labels = Arc::new(Mutex::new(Vec::new()));
        let sink = labels.clone();
        let cache: TtlCache<Vec<Value>> = TtlCache::new(API_CLIENT_CACHE_TTL);
        let client = api_client(
            &HttpClient::new(),
            format!("http://{addr}"),
            cache.clone(),
            EnhancementOptions::new()
                .with_retry(RetryConfig::new(4, Duration::from_millis(1)))
                .with_timing(TimingConfig::new("Posts").with_logger(move |message: &str| {
                    sink.lock().unwrap().push(message.to_string());
                })),
        );

        let err = client.call("/posts".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::Status(503)));

        // One attempt plus four retries instead of the default two
        assert_eq!(hits.load(Ordering::SeqCst), 5);
        let labels = labels.lock().unwrap();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].starts_with("Posts took "));
        // The default cache layer is still in place and stores nothing on failure
        assert!(cache.is_empty().await);
    }

    #[test]
    fn test_or_defaults_keeps_set_layers() {
        let options: EnhancementOptions<String, String> = EnhancementOptions::new()
            .with_base_url("https://override.example.com")
            .or_defaults(
                EnhancementOptions::new()
                    .with_base_url("https://default.example.com")
                    .with_retry(RetryConfig::default()),
            );

        assert_eq!(
            options.base_url.as_deref(),
            Some("https://override.example.com")
        );
        assert_eq!(options.retry.map(|r| r.max_retries), Some(3));
        assert!(options.cache.is_none());
        assert!(options.timing.is_none());
    }

    #[tokio::test]
    async fn test_with_enhancements_over_non_url_args() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let timings = Arc::new(AtomicU32::new(0));
        let timing_count = timings.clone();
        let cache = TtlCache::new(Duration::from_secs(60));

        let op = with_enhancements(
            move |n: u32| {
                // Fails on the first attempt only
                let attempt = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        Err(AppError::Status(503))
                    } else {
                        Ok::<_, AppError>(n + 1)
                    }
                }
            },
            EnhancementOptions::new()
                .with_retry(RetryConfig::new(1, Duration::from_millis(1)))
                .with_cache(CacheConfig::new(cache.clone()))
                .with_timing(TimingConfig::new("inc").with_logger(move |_: &str| {
                    timing_count.fetch_add(1, Ordering::SeqCst);
                })),
        )
        .unwrap();

        assert_eq!(op.call(41).await.unwrap(), 42);
        assert_eq!(op.call(41).await.unwrap(), 42);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(timings.load(Ordering::SeqCst), 2);
        assert!(cache.contains("41").await);
    }

    #[test]
    fn test_with_enhancements_rejects_base_url() {
        let result = with_enhancements(
            |n: u32| async move { Ok::<_, AppError>(n) },
            EnhancementOptions::new().with_base_url("https://api.example.com"),
        );

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_cached_shortcut() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let op = cached(
            move |n: u32| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, AppError>(n * 10) }
            },
            TtlCache::new(Duration::from_secs(60)),
        );

        assert_eq!(op.call(4).await.unwrap(), 40);
        assert_eq!(op.call(4).await.unwrap(), 40);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

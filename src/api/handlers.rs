//! API Handlers
//!
//! HTTP request handlers for each search service endpoint.

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use tracing::error;

use crate::cache::TtlCache;
use crate::client::HttpClient;
use crate::config::Config;
use crate::enhance::{
    with_request_enhancements, CacheConfig, EnhancementOptions, SharedOperation, TimingConfig,
};
use crate::error::Result;
use crate::models::{
    CacheStatsResponse, ClearCacheResponse, HealthResponse, SearchParams, SearchResponse,
};
use crate::search::search_posts;

/// Upstream path listing every post.
pub const POSTS_PATH: &str = "/posts";

/// Raw upstream payload: the JSON array of post records.
pub type RawPosts = Vec<Value>;

/// Application state shared across all handlers.
///
/// Owns the enhanced posts fetcher and the cache inside it, so cache
/// lifetime follows the service instance.
#[derive(Clone)]
pub struct AppState {
    /// Fetches the posts listing for a path
    pub posts: SharedOperation<String, RawPosts>,
    /// The cache used by `posts`
    pub cache: TtlCache<RawPosts>,
}

impl AppState {
    /// Creates a new AppState from a fetcher and the cache it writes to.
    pub fn new(posts: SharedOperation<String, RawPosts>, cache: TtlCache<RawPosts>) -> Self {
        Self { posts, cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires an HTTP fetch through base URL, retry, cache and timing layers.
    pub fn from_config(config: &Config) -> Self {
        let cache = TtlCache::new(config.cache_ttl());
        let posts = with_request_enhancements(
            HttpClient::new().json_operation::<RawPosts>(),
            EnhancementOptions::new()
                .with_base_url(config.upstream_base_url.clone())
                .with_retry(config.retry())
                .with_cache(CacheConfig::new(cache.clone()))
                .with_timing(TimingConfig::new(config.timing_label.clone())),
        );
        Self::new(posts, cache)
    }
}

/// Handler for GET /api/search
///
/// Fetches every post, then filters by `q` and groups by user. Any failure
/// is logged and answered with the error envelope. The query string is read
/// as raw pairs so a repeated `q` resolves to its first value.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>> {
    let params = SearchParams::from_pairs(&pairs);
    let raw = state
        .posts
        .call(POSTS_PATH.to_string())
        .await
        .map_err(|err| {
            error!(error = %err, "Search API error");
            err
        })?;

    Ok(Json(search_posts(&raw, params.query())))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.cache.stats().await;
    let ttl_ms = u64::try_from(state.cache.ttl().as_millis()).unwrap_or(u64::MAX);

    Json(CacheStatsResponse::new(&stats, ttl_ms))
}

/// Handler for DELETE /api/cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.cache.clear().await;
    Json(ClearCacheResponse::new(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

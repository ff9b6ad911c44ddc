//! Response DTOs for the search API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::UserGroup;

/// `meta.query` value when no query was given.
pub const ALL_QUERY: &str = "all";

/// `error` value of every failure envelope.
pub const FETCH_FAILED: &str = "Failed to fetch posts";

/// Summary counts accompanying a search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    pub total_users: usize,
    /// Upstream records before filtering
    pub total_posts: usize,
    /// Records across all groups after filtering
    pub filtered_posts: usize,
    pub query: String,
}

/// Success envelope for `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<UserGroup>,
    pub meta: SearchMeta,
}

impl SearchResponse {
    /// Packages sorted groups with their summary counts.
    pub fn new(groups: Vec<UserGroup>, total_posts: usize, query: &str) -> Self {
        let filtered_posts = groups.iter().map(|g| g.posts.len()).sum();
        let query = if query.is_empty() { ALL_QUERY } else { query };

        Self {
            success: true,
            meta: SearchMeta {
                total_users: groups.len(),
                total_posts,
                filtered_posts,
                query: query.to_string(),
            },
            data: groups,
        }
    }
}

/// Error envelope returned for every failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    /// Details of the underlying failure
    pub message: String,
}

impl ErrorResponse {
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: FETCH_FAILED.to_string(),
            message: message.into(),
        }
    }
}

/// Response body for `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    pub ttl_ms: u64,
}

impl CacheStatsResponse {
    pub fn new(stats: &CacheStats, ttl_ms: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            ttl_ms,
        }
    }
}

/// Response body for `DELETE /api/cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
    pub cleared: usize,
}

impl ClearCacheResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached entries", cleared),
            cleared,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

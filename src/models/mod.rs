//! Data model and request/response payloads
//!
//! Posts as fetched and enriched, per-user groups, and the DTOs used for
//! serializing/deserializing HTTP bodies.

pub mod post;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use post::{Post, RawPost, UserGroup};
pub use requests::SearchParams;
pub use responses::{
    CacheStatsResponse, ClearCacheResponse, ErrorResponse, HealthResponse, SearchMeta,
    SearchResponse,
};

//! Request Enhancements
//!
//! Decorators that wrap an async [`Operation`] and return another operation
//! with the same signature, plus the utility that composes them.
//!
//! # Layers
//! - Base URL: prefixes relative paths
//! - Retry: bounded attempts with exponential backoff
//! - Cache: TTL memoization keyed by the call arguments
//! - Timing: logs elapsed time around the call

mod base_url;
mod cache;
mod compose;
mod operation;
mod retry;
mod timing;


pub use base_url::{prefix_base_url, UrlArgs, WithBaseUrl};
pub use cache::{default_cache_key, CacheConfig, KeyGenerator, WithCache};
pub use compose::{
    api_client, cached, with_enhancements, with_request_enhancements, EnhancementOptions,
    API_CLIENT_CACHE_TTL,
};
pub use operation::{shared, Operation, SharedOperation};
pub use retry::{RetryConfig, WithRetry};
pub use timing::{Logger, TimingConfig, WithTiming};

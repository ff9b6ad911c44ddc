//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::enhance::RetryConfig;

/// Upstream used when `UPSTREAM_BASE_URL` is not set.
pub const DEFAULT_UPSTREAM: &str = "https://jsonplaceholder.typicode.com";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL prefixed to upstream paths
    pub upstream_base_url: String,
    /// Retries after the first failed upstream attempt
    pub max_retries: u32,
    /// Initial backoff delay in milliseconds
    pub retry_delay_ms: u64,
    /// Lifetime of a cached upstream response in milliseconds
    pub cache_ttl_ms: u64,
    /// Label used when logging upstream call durations
    pub timing_label: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_BASE_URL` - upstream API root (default: jsonplaceholder)
    /// - `MAX_RETRIES` - retries per upstream call (default: 2)
    /// - `RETRY_DELAY_MS` - initial backoff delay (default: 1000)
    /// - `CACHE_TTL_MS` - cache entry lifetime (default: 60000)
    /// - `TIMING_LABEL` - label for timing logs (default: "Posts API Request")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.upstream_base_url),
            max_retries: parse_var("MAX_RETRIES").unwrap_or(defaults.max_retries),
            retry_delay_ms: parse_var("RETRY_DELAY_MS").unwrap_or(defaults.retry_delay_ms),
            cache_ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            timing_label: env::var("TIMING_LABEL").unwrap_or(defaults.timing_label),
        }
    }

    /// Retry policy for upstream calls.
    pub fn retry(&self) -> RetryConfig {
        RetryConfig::new(self.max_retries, Duration::from_millis(self.retry_delay_ms))
    }

    /// Cache entry lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_base_url: DEFAULT_UPSTREAM.to_string(),
            max_retries: 2,
            retry_delay_ms: 1000,
            cache_ttl_ms: 60_000,
            timing_label: "Posts API Request".to_string(),
        }
    }
}

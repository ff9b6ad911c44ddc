//! Post Search - fetches, enriches and groups posts from a JSON upstream
//!
//! Upstream calls go through composable enhancements (base URL, retry with
//! backoff, TTL cache, timing) before the search pipeline groups the result.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod enhance;
pub mod error;
pub mod models;
pub mod search;

pub use api::AppState;
pub use config::Config;
pub use error::{AppError, Result};

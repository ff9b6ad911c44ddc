//! API Module
//!
//! HTTP handlers and routing for the search service.
//!
//! # Endpoints
//! - `GET /api/search?q=` - Search and group posts
//! - `GET /api/cache/stats` - Posts cache statistics
//! - `DELETE /api/cache` - Drop all cached upstream responses
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

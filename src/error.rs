//! Error types for the search service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Unified error type for the search service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream answered with a non-2xx status
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Transport-level failure talking to the upstream
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Every failure kind maps to the same client-visible envelope.
        let body = Json(ErrorResponse::fetch_failed(self.to_string()));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the search service.
pub type Result<T> = std::result::Result<T, AppError>;

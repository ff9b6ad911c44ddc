//! HTTP Fetch Primitive
//!
//! Single JSON GET against the upstream, with no retry or caching of its own.

use serde::de::DeserializeOwned;

use crate::enhance::Operation;
use crate::error::{AppError, Result};

/// Thin wrapper around a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a GET to `url` and parses the body as JSON.
    ///
    /// Non-2xx responses become [`AppError::Status`] without reading the body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// [`get_json`](Self::get_json) as an enhanceable operation over the URL.
    pub fn json_operation<T>(&self) -> impl Operation<String, T> + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        move |url: String| {
            let client = client.clone();
            async move { client.get_json::<T>(&url).await }
        }
    }
}

//! Request DTOs for the search API
//!
//! Defines the structure of incoming query strings.

use serde::Deserialize;

/// Query string for `GET /api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive substring; absent means match everything
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    /// Builds params from raw query pairs, keeping the first `q`.
    ///
    /// Later duplicates are ignored rather than rejected.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let q = pairs
            .iter()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.clone());
        Self { q }
    }

    /// The query with absence folded into the empty string.
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

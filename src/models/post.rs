//! Post records
//!
//! The raw upstream record, its enriched form, and the per-user group.

use serde::Serialize;
use serde_json::Value;

/// Titles longer than this many characters count as long.
pub const LONG_TITLE_THRESHOLD: usize = 50;

/// Characters of body kept in an excerpt.
pub const EXCERPT_LENGTH: usize = 100;

// == Raw Post ==
/// A record as returned by the upstream `/posts` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
}

impl RawPost {
    /// Reads a record out of loosely typed JSON.
    ///
    /// Missing or wrong-typed numbers become `0`, strings become `""`.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: int_field(value, "id"),
            title: str_field(value, "title"),
            body: str_field(value, "body"),
            user_id: int_field(value, "userId"),
        }
    }
}

fn int_field(value: &Value, name: &str) -> i64 {
    value.get(name).and_then(Value::as_i64).unwrap_or(0)
}

fn str_field(value: &Value, name: &str) -> String {
    value
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// == Post ==
/// A raw record plus fields derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: i64,
    /// Title length in characters
    pub title_length: usize,
    /// Body length in characters
    pub body_length: usize,
    pub has_long_title: bool,
    /// First `EXCERPT_LENGTH` characters of the body followed by `...`
    pub excerpt: String,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let title_length = raw.title.chars().count();
        let body_length = raw.body.chars().count();
        let mut excerpt: String = raw.body.chars().take(EXCERPT_LENGTH).collect();
        excerpt.push_str("...");

        Self {
            id: raw.id,
            title: raw.title,
            body: raw.body,
            user_id: raw.user_id,
            title_length,
            body_length,
            has_long_title: title_length > LONG_TITLE_THRESHOLD,
            excerpt,
        }
    }
}

// == User Group ==
/// Posts sharing a `userId`, with aggregates over them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    /// The shared `userId`
    pub user: i64,
    pub posts: Vec<Post>,
    pub total_title_length: usize,
    pub average_title_length: f64,
    pub post_count: usize,
    pub has_long_titles: bool,
    /// Member with the longest title, earliest wins on ties
    pub longest_title: Post,
}

//! Record Transformation
//!
//! Turns raw upstream JSON records into enriched posts.

use serde_json::Value;

use crate::models::{Post, RawPost};

// == Transform ==
/// Enriches every raw record, preserving order.
pub fn transform_posts(raw: &[Value]) -> Vec<Post> {
    raw.iter()
        .map(|value| Post::from(RawPost::from_value(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transform_keeps_order_and_derives_fields() {
        let raw = vec![
            json!({"id": 1, "title": "A".repeat(60), "body": "short", "userId": 2}),
            json!({"id": 2, "title": "tiny", "body": "x".repeat(120), "userId": 1}),
        ];

        let posts = transform_posts(&raw);

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert!(posts[0].has_long_title);
        assert_eq!(posts[0].title_length, 60);
        assert_eq!(posts[1].excerpt, format!("{}...", "x".repeat(100)));
    }

    #[test]
    fn test_transform_tolerates_malformed_records() {
        let posts = transform_posts(&[json!(null), json!({"title": 5})]);

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].title, "");
        assert_eq!(posts[1].user_id, 0);
    }
}

//! Search Pipeline
//!
//! Turns the raw upstream records into the search envelope:
//! transform, filter, group, sort, assemble.

mod filter;
mod group;
mod transform;


pub use filter::{filter_posts, matches_query};
pub use group::{group_by_user, sort_groups};
pub use transform::transform_posts;

use serde_json::Value;

use crate::models::SearchResponse;

/// Runs the whole pipeline over `raw` for `query`.
///
/// `meta.totalPosts` counts the raw records before filtering.
pub fn search_posts(raw: &[Value], query: &str) -> SearchResponse {
    let posts = filter_posts(transform_posts(raw), query);
    let mut groups = group_by_user(posts);
    sort_groups(&mut groups);

    SearchResponse::new(groups, raw.len(), query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Vec<Value> {
        vec![
            json!({"id": 1, "title": "alpha", "body": "first body", "userId": 1}),
            json!({"id": 2, "title": "beta", "body": "second body", "userId": 2}),
            json!({"id": 3, "title": "gamma", "body": "third ALPHA", "userId": 2}),
            json!({"id": 4, "title": "delta", "body": "fourth", "userId": 3}),
        ]
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let resp = search_posts(&fixture(), "");

        assert_eq!(resp.meta.total_users, 3);
        assert_eq!(resp.meta.total_posts, 4);
        assert_eq!(resp.meta.filtered_posts, 4);
        assert_eq!(resp.meta.query, "all");

        // User 2 has the most posts; users 1 and 3 keep first-seen order
        let users: Vec<i64> = resp.data.iter().map(|g| g.user).collect();
        assert_eq!(users, vec![2, 1, 3]);
    }

    #[test]
    fn test_query_filters_before_grouping() {
        let resp = search_posts(&fixture(), "Alpha");

        assert_eq!(resp.meta.total_posts, 4);
        assert_eq!(resp.meta.filtered_posts, 2);
        assert_eq!(resp.meta.total_users, 2);
        assert_eq!(resp.meta.query, "Alpha");
    }

    #[test]
    fn test_no_matches() {
        let resp = search_posts(&fixture(), "zzz");

        assert!(resp.success);
        assert!(resp.data.is_empty());
        assert_eq!(resp.meta.filtered_posts, 0);
        assert_eq!(resp.meta.total_posts, 4);
    }
}

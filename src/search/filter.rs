//! Query Filtering
//!
//! Case-insensitive substring matching over post titles and bodies.

use crate::models::Post;

// == Matching ==
/// True when the title or body contains `needle`, which must already be
/// lower-cased.
pub fn matches_query(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle) || post.body.to_lowercase().contains(needle)
}

// == Filtering ==
/// Keeps posts matching `query` case-insensitively; an empty query keeps all.
pub fn filter_posts(posts: Vec<Post>, query: &str) -> Vec<Post> {
    if query.is_empty() {
        return posts;
    }

    let needle = query.to_lowercase();
    posts
        .into_iter()
        .filter(|post| matches_query(post, &needle))
        .collect()
}

//! User Grouping
//!
//! Buckets posts per author with title statistics, then orders the groups.

use std::collections::HashMap;

use crate::models::{Post, UserGroup};

// == Group Builder ==
/// Running aggregates for one user while grouping.
struct GroupBuilder {
    user: i64,
    posts: Vec<Post>,
    total_title_length: usize,
    has_long_titles: bool,
    longest: usize,
}

impl GroupBuilder {
    fn new(user: i64) -> Self {
        Self {
            user,
            posts: Vec::new(),
            total_title_length: 0,
            has_long_titles: false,
            longest: 0,
        }
    }

    fn push(&mut self, post: Post) {
        self.total_title_length += post.title_length;
        self.has_long_titles |= post.has_long_title;
        // Strictly greater, so the earliest post wins a tie
        if let Some(current) = self.posts.get(self.longest) {
            if post.title_length > current.title_length {
                self.longest = self.posts.len();
            }
        }
        self.posts.push(post);
    }

    fn finish(self) -> UserGroup {
        let post_count = self.posts.len();
        let longest_title = self.posts[self.longest].clone();

        UserGroup {
            user: self.user,
            total_title_length: self.total_title_length,
            average_title_length: self.total_title_length as f64 / post_count as f64,
            post_count,
            has_long_titles: self.has_long_titles,
            longest_title,
            posts: self.posts,
        }
    }
}

// == Grouping ==
/// Buckets posts by `user_id` in a single pass.
///
/// Groups come out in the order their user was first seen; posts keep their
/// input order within a group.
pub fn group_by_user(posts: Vec<Post>) -> Vec<UserGroup> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut builders: Vec<GroupBuilder> = Vec::new();

    for post in posts {
        let slot = *index.entry(post.user_id).or_insert_with(|| {
            builders.push(GroupBuilder::new(post.user_id));
            builders.len() - 1
        });
        builders[slot].push(post);
    }

    builders.into_iter().map(GroupBuilder::finish).collect()
}

// == Sorting ==
/// Orders groups by descending post count, keeping ties in place.
pub fn sort_groups(groups: &mut [UserGroup]) {
    groups.sort_by(|a, b| b.post_count.cmp(&a.post_count));
}

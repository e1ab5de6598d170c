//! # MemoryStore
//!
//! In-process implementation of both repository ports.
//! Counters and comment lists are mutated under the per-key shard lock,
//! so concurrent upvotes never lose an increment.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use domains::{
    Comment, CommentRepository, DomainError, NewComment, NewPost, Post, PostRepository, Result,
};
use uuid::Uuid;

/// A record plus its insertion sequence number.
struct Stored<T> {
    seq: u64,
    value: T,
}

#[derive(Default)]
pub struct MemoryStore {
    posts: DashMap<String, Stored<Post>>,
    comments: DashMap<String, Stored<Comment>>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts: Vec<(u64, Post)> = self
            .posts
            .iter()
            .map(|entry| (entry.seq, entry.value.clone()))
            .collect();
        posts.sort_by_key(|(seq, _)| *seq);
        Ok(posts.into_iter().map(|(_, post)| post).collect())
    }

    async fn insert_post(&self, new: NewPost) -> Result<Post> {
        let post = Post {
            id: Uuid::new_v4().to_string(),
            fields: new.fields,
            upvotes: 0,
            comments: Vec::new(),
            created_at: Utc::now(),
        };
        let seq = self.next_seq();
        self.posts.insert(
            post.id.clone(),
            Stored {
                seq,
                value: post.clone(),
            },
        );
        Ok(post)
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.posts.get(id).map(|entry| entry.value.clone()))
    }

    async fn increment_post_upvotes(&self, id: &str) -> Result<Post> {
        let mut entry = self
            .posts
            .get_mut(id)
            .ok_or_else(|| DomainError::post_not_found(id))?;
        entry.value.upvotes += 1;
        Ok(entry.value.clone())
    }

    async fn append_comment(&self, post_id: &str, comment_id: &str) -> Result<Post> {
        let mut entry = self
            .posts
            .get_mut(post_id)
            .ok_or_else(|| DomainError::post_not_found(post_id))?;
        entry.value.comments.push(comment_id.to_string());
        Ok(entry.value.clone())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn insert_comment(&self, post_id: &str, new: NewComment) -> Result<Comment> {
        if !self.posts.contains_key(post_id) {
            return Err(DomainError::post_not_found(post_id));
        }
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            fields: new.fields,
            upvotes: 0,
            post: post_id.to_string(),
            created_at: Utc::now(),
        };
        let seq = self.next_seq();
        self.comments.insert(
            comment.id.clone(),
            Stored {
                seq,
                value: comment.clone(),
            },
        );
        Ok(comment)
    }

    async fn find_comment(&self, id: &str) -> Result<Option<Comment>> {
        Ok(self.comments.get(id).map(|entry| entry.value.clone()))
    }

    async fn find_comments(&self, ids: &[String]) -> Result<Vec<Comment>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.comments.get(id).map(|entry| entry.value.clone()))
            .collect())
    }

    async fn increment_comment_upvotes(&self, id: &str) -> Result<Comment> {
        let mut entry = self
            .comments
            .get_mut(id)
            .ok_or_else(|| DomainError::comment_not_found(id))?;
        entry.value.upvotes += 1;
        Ok(entry.value.clone())
    }
}

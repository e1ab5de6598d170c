//! # Repository Ports
//!
//! Any store adapter must implement these traits to be used by the binary.
//! Identifiers are opaque strings; adapters decide their format.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, NewComment, NewPost, Post};

/// Persistence contract for posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in insertion order.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    async fn insert_post(&self, new: NewPost) -> Result<Post>;

    async fn find_post(&self, id: &str) -> Result<Option<Post>>;

    /// Adds one to the post's counter in a single store operation.
    async fn increment_post_upvotes(&self, id: &str) -> Result<Post>;

    /// Appends a comment reference to the end of the post's comment list.
    async fn append_comment(&self, post_id: &str, comment_id: &str) -> Result<Post>;
}

/// Persistence contract for comments.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persists a comment whose back-reference is `post_id`.
    async fn insert_comment(&self, post_id: &str, new: NewComment) -> Result<Comment>;

    async fn find_comment(&self, id: &str) -> Result<Option<Comment>>;

    /// Every comment whose id is in `ids`. Missing ids are skipped; order is unspecified.
    async fn find_comments(&self, ids: &[String]) -> Result<Vec<Comment>>;

    async fn increment_comment_upvotes(&self, id: &str) -> Result<Comment>;
}

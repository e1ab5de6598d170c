//! # PostService
//!
//! Post resolution, listing, creation, expansion and upvoting.

use std::collections::HashMap;
use std::sync::Arc;

use domains::{
    Comment, CommentRepository, DomainError, NewPost, Post, PostDetail, PostRepository, Result,
};
use serde_json::Value;
use tracing::{debug, info};

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        self.posts.list_posts().await
    }

    pub async fn create(&self, body: Value) -> Result<Post> {
        let new = NewPost::from_body(body)?;
        let post = self.posts.insert_post(new).await?;
        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    /// Loads the post named by a `{post}` path segment.
    pub async fn resolve(&self, id: &str) -> Result<Post> {
        debug!(post_id = id, "resolving post");
        self.posts
            .find_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Expands the post's comment references with one batched lookup.
    ///
    /// Comments come back in the post's insertion order; dangling references are skipped.
    pub async fn with_comments(&self, post: Post) -> Result<PostDetail> {
        if post.comments.is_empty() {
            return Ok(post.into_detail(Vec::new()));
        }

        let found: HashMap<String, Comment> = self
            .comments
            .find_comments(&post.comments)
            .await?
            .into_iter()
            .map(|comment| (comment.id.clone(), comment))
            .collect();

        let ordered = post
            .comments
            .iter()
            .filter_map(|id| found.get(id).cloned())
            .collect();
        Ok(post.into_detail(ordered))
    }

    pub async fn upvote(&self, post: &Post) -> Result<Post> {
        let updated = self.posts.increment_post_upvotes(&post.id).await?;
        debug!(post_id = %updated.id, upvotes = updated.upvotes, "post upvoted");
        Ok(updated)
    }
}

//! # CommentService
//!
//! Comment resolution, creation under a resolved post, and upvoting.

use std::sync::Arc;

use domains::{
    Comment, CommentRepository, DomainError, NewComment, Post, PostRepository, Result,
};
use serde_json::Value;
use tracing::{debug, info, warn};

pub struct CommentService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    /// Loads the comment named by a `{comment}` path segment.
    pub async fn resolve(&self, id: &str) -> Result<Comment> {
        debug!(comment_id = id, "resolving comment");
        self.comments
            .find_comment(id)
            .await?
            .ok_or_else(|| DomainError::comment_not_found(id))
    }

    /// Stores the comment, then links it from the post.
    ///
    /// The two writes are not atomic. When the link fails the comment stays in
    /// the store without a reference from its post, and the error is returned.
    pub async fn create(&self, post: &Post, body: Value) -> Result<Comment> {
        let new = NewComment::from_body(body)?;
        let comment = self.comments.insert_comment(&post.id, new).await?;

        if let Err(err) = self.posts.append_comment(&post.id, &comment.id).await {
            warn!(
                post_id = %post.id,
                comment_id = %comment.id,
                error = %err,
                "comment stored but not linked to its post"
            );
            return Err(err);
        }

        info!(post_id = %post.id, comment_id = %comment.id, "comment created");
        Ok(comment)
    }

    /// Upvotes `comment`. The comment is not required to belong to `post`.
    pub async fn upvote(&self, post: &Post, comment: &Comment) -> Result<Comment> {
        if comment.post != post.id {
            warn!(
                post_id = %post.id,
                comment_id = %comment.id,
                owner_id = %comment.post,
                "upvoting comment through a post it does not belong to"
            );
        }
        let updated = self.comments.increment_comment_upvotes(&comment.id).await?;
        debug!(comment_id = %updated.id, upvotes = updated.upvotes, "comment upvoted");
        Ok(updated)
    }
}

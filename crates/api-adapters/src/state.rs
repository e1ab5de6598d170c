//! Request-independent state shared by every handler.

use std::sync::Arc;

use domains::{CommentRepository, PostRepository};
use services::{CommentService, PostService};

/// The store handle is created once at startup and reached only through here.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
}

impl AppState {
    /// Wires both services to a store implementing both ports.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: PostRepository + CommentRepository + 'static,
    {
        Self::from_repos(store.clone(), store)
    }

    pub fn from_repos(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            posts: Arc::new(PostService::new(posts.clone(), comments.clone())),
            comments: Arc::new(CommentService::new(posts, comments)),
        }
    }
}

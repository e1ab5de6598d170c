//! # services
//!
//! Use cases of the forum, written against the repository ports only.

pub mod comment_service;
pub mod post_service;

pub use comment_service::CommentService;
pub use post_service::PostService;

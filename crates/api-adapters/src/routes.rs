use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{comments, pages, posts};
use crate::middleware::standard_middleware;
use crate::state::AppState;

/// Builds the forum router.
///
/// Routes with a `{post}` segment resolve the post before the handler runs;
/// `{comment}` resolves after it.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    let routes = Router::new()
        .route("/", get(pages::index))
        .route("/health", get(pages::health))
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/{post}", get(posts::get_post))
        .route("/posts/{post}/upvote", put(posts::upvote_post))
        .route("/posts/{post}/comments", post(comments::create_comment))
        .route(
            "/posts/{post}/comments/{comment}/upvote",
            put(comments::upvote_comment),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes));

    standard_middleware(routes).with_state(state)
}

use axum::extract::State;
use axum::Json;
use domains::{Post, PostDetail};

use crate::error::ApiError;
use crate::extract::{JsonBody, ResolvedPost};
use crate::state::AppState;

/// `GET /posts`
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(state.posts.list().await?))
}

/// `POST /posts`
pub async fn create_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.create(body).await?))
}

/// `GET /posts/{post}`, with comments expanded.
pub async fn get_post(
    State(state): State<AppState>,
    ResolvedPost(post): ResolvedPost,
) -> Result<Json<PostDetail>, ApiError> {
    Ok(Json(state.posts.with_comments(post).await?))
}

/// `PUT /posts/{post}/upvote`
pub async fn upvote_post(
    State(state): State<AppState>,
    ResolvedPost(post): ResolvedPost,
) -> Result<Json<Post>, ApiError> {
    Ok(Json(state.posts.upvote(&post).await?))
}

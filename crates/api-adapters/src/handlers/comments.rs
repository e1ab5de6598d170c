use axum::extract::State;
use axum::Json;
use domains::Comment;

use crate::error::ApiError;
use crate::extract::{JsonBody, ResolvedComment, ResolvedPost};
use crate::state::AppState;

/// `POST /posts/{post}/comments`
///
/// Responds with the stored comment, not the updated post.
pub async fn create_comment(
    State(state): State<AppState>,
    ResolvedPost(post): ResolvedPost,
    JsonBody(body): JsonBody,
) -> Result<Json<Comment>, ApiError> {
    Ok(Json(state.comments.create(&post, body).await?))
}

/// `PUT /posts/{post}/comments/{comment}/upvote`
pub async fn upvote_comment(
    State(state): State<AppState>,
    ResolvedPost(post): ResolvedPost,
    ResolvedComment(comment): ResolvedComment,
) -> Result<Json<Comment>, ApiError> {
    Ok(Json(state.comments.upvote(&post, &comment).await?))
}

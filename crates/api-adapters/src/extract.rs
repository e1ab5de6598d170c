//! # Resolvers
//!
//! Extractors that load the entity named by a path segment before the handler
//! runs. Handlers list them in path order, so `{post}` resolves before
//! `{comment}`. Each resolution is one store read; nothing is cached.

use std::collections::HashMap;

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use domains::{Comment, Post};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// The post named by the `{post}` segment.
#[derive(Debug)]
pub struct ResolvedPost(pub Post);

/// The comment named by the `{comment}` segment.
#[derive(Debug)]
pub struct ResolvedComment(pub Comment);

/// A JSON request body, handed to the services unvalidated.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl FromRequestParts<AppState> for ResolvedPost {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let id = path_segment(parts, state, "post").await?;
        Ok(Self(state.posts.resolve(&id).await?))
    }
}

impl FromRequestParts<AppState> for ResolvedComment {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let id = path_segment(parts, state, "comment").await?;
        Ok(Self(state.comments.resolve(&id).await?))
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

async fn path_segment(parts: &mut Parts, state: &AppState, name: &str) -> Result<String, ApiError> {
    let Path(mut segments) =
        Path::<HashMap<String, String>>::from_request_parts(parts, state).await?;
    segments.remove(name).ok_or_else(|| ApiError::Rejected {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!("route has no `{name}` segment"),
    })
}

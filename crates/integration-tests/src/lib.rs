//! Shared fixtures for the router-level tests.
//!
//! Every test builds its own app over a fresh `MemoryStore`; requests go
//! through `tower::ServiceExt::oneshot`, so no socket is opened.

#![cfg(feature = "web-axum")]

use std::sync::{Arc, Mutex};

use api_adapters::{router, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use domains::{
    Comment, CommentRepository, DomainError, NewComment, NewPost, Post, PostRepository, Result,
};
use serde_json::Value;
use storage_adapters::MemoryStore;
use tower::ServiceExt;

pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// The full router over an empty memory store.
pub fn test_app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

pub fn app_with_store<S>(store: Arc<S>) -> Router
where
    S: PostRepository + CommentRepository + 'static,
{
    router(AppState::new(store), MAX_BODY_BYTES)
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON, or the raw text as a JSON string when the body is not JSON
    pub body: Value,
}

impl TestResponse {
    pub fn error_code(&self) -> Option<&str> {
        self.body.pointer("/error/code").and_then(Value::as_str)
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    match body {
        Some(json) => send_raw(app, method, uri, Some(("application/json", json.to_string()))).await,
        None => send_raw(app, method, uri, None).await,
    }
}

/// Sends `body` verbatim with the given content type.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<(&str, String)>,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some((content_type, text)) => {
            request = request.header(header::CONTENT_TYPE, content_type);
            Body::from(text)
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("valid request"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Creates a post and returns its JSON representation.
pub async fn create_post(app: &Router, body: Value) -> Value {
    let response = send(app, Method::POST, "/posts", Some(body)).await;
    assert_eq!(response.status, StatusCode::OK, "create post: {:?}", response.body);
    response.body
}

/// Creates a comment under `post_id` and returns its JSON representation.
pub async fn create_comment(app: &Router, post_id: &str, body: Value) -> Value {
    let uri = format!("/posts/{post_id}/comments");
    let response = send(app, Method::POST, &uri, Some(body)).await;
    assert_eq!(response.status, StatusCode::OK, "create comment: {:?}", response.body);
    response.body
}

pub fn id_of(entity: &Value) -> String {
    entity["id"].as_str().expect("entity has a string id").to_string()
}

/// A store whose every operation fails as if the database were unreachable.
pub struct UnavailableStore;

fn unavailable<T>() -> Result<T> {
    Err(DomainError::Storage("connection refused".into()))
}

#[async_trait]
impl PostRepository for UnavailableStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        unavailable()
    }
    async fn insert_post(&self, _new: NewPost) -> Result<Post> {
        unavailable()
    }
    async fn find_post(&self, _id: &str) -> Result<Option<Post>> {
        unavailable()
    }
    async fn increment_post_upvotes(&self, _id: &str) -> Result<Post> {
        unavailable()
    }
    async fn append_comment(&self, _post_id: &str, _comment_id: &str) -> Result<Post> {
        unavailable()
    }
}

#[async_trait]
impl CommentRepository for UnavailableStore {
    async fn insert_comment(&self, _post_id: &str, _new: NewComment) -> Result<Comment> {
        unavailable()
    }
    async fn find_comment(&self, _id: &str) -> Result<Option<Comment>> {
        unavailable()
    }
    async fn find_comments(&self, _ids: &[String]) -> Result<Vec<Comment>> {
        unavailable()
    }
    async fn increment_comment_upvotes(&self, _id: &str) -> Result<Comment> {
        unavailable()
    }
}

/// A memory store that stores comments but cannot link them to their post.
#[derive(Default)]
pub struct UnlinkableStore {
    pub inner: MemoryStore,
    /// Ids of every comment stored so far
    pub stored_comments: Mutex<Vec<String>>,
}

#[async_trait]
impl PostRepository for UnlinkableStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.inner.list_posts().await
    }
    async fn insert_post(&self, new: NewPost) -> Result<Post> {
        self.inner.insert_post(new).await
    }
    async fn find_post(&self, id: &str) -> Result<Option<Post>> {
        self.inner.find_post(id).await
    }
    async fn increment_post_upvotes(&self, id: &str) -> Result<Post> {
        self.inner.increment_post_upvotes(id).await
    }
    async fn append_comment(&self, _post_id: &str, _comment_id: &str) -> Result<Post> {
        Err(DomainError::Storage("write timed out".into()))
    }
}

#[async_trait]
impl CommentRepository for UnlinkableStore {
    async fn insert_comment(&self, post_id: &str, new: NewComment) -> Result<Comment> {
        let comment = self.inner.insert_comment(post_id, new).await?;
        self.stored_comments
            .lock()
            .expect("lock poisoned")
            .push(comment.id.clone());
        Ok(comment)
    }
    async fn find_comment(&self, id: &str) -> Result<Option<Comment>> {
        self.inner.find_comment(id).await
    }
    async fn find_comments(&self, ids: &[String]) -> Result<Vec<Comment>> {
        self.inner.find_comments(ids).await
    }
    async fn increment_comment_upvotes(&self, id: &str) -> Result<Comment> {
        self.inner.increment_comment_upvotes(id).await
    }
}

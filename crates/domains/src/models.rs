//! # Domain Models
//!
//! Posts and comments carry arbitrary client-supplied content members next to
//! the members the store manages (`id`, `upvotes`, links, `createdAt`).
//! Content is kept as a JSON object and flattened into the wire representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, Result};

/// Free-form content members of a post or comment (e.g. author, title, body).
pub type Fields = Map<String, Value>;

/// Members of a post body that belong to the store and are dropped on create.
pub const POST_MANAGED_FIELDS: &[&str] = &["id", "upvotes", "comments", "createdAt"];

/// Members of a comment body that belong to the store and are dropped on create.
pub const COMMENT_MANAGED_FIELDS: &[&str] = &["id", "upvotes", "post", "createdAt"];

/// A top-level forum entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Opaque, store-assigned identifier
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
    pub upvotes: i64,
    /// Comment identifiers in insertion order
    pub comments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A reply linked to exactly one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
    pub upvotes: i64,
    /// Back-reference to the owning post's identifier
    pub post: String,
    pub created_at: DateTime<Utc>,
}

/// A post with its comment references expanded into full comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
    pub upvotes: i64,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

/// Content of a post that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewPost {
    pub fields: Fields,
}

/// Content of a comment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewComment {
    pub fields: Fields,
}

impl NewPost {
    /// Applies the store schema to a raw request body.
    pub fn from_body(body: Value) -> Result<Self> {
        content_fields("post", body, POST_MANAGED_FIELDS).map(|fields| Self { fields })
    }
}

impl NewComment {
    pub fn from_body(body: Value) -> Result<Self> {
        content_fields("comment", body, COMMENT_MANAGED_FIELDS).map(|fields| Self { fields })
    }
}

impl Post {
    /// Replaces the comment references with the given comments.
    ///
    /// The caller is responsible for ordering `comments` like `self.comments`.
    pub fn into_detail(self, comments: Vec<Comment>) -> PostDetail {
        PostDetail {
            id: self.id,
            fields: self.fields,
            upvotes: self.upvotes,
            comments,
            created_at: self.created_at,
        }
    }
}

fn content_fields(entity: &str, body: Value, managed: &[&str]) -> Result<Fields> {
    match body {
        Value::Object(mut fields) => {
            fields.retain(|key, _| !managed.contains(&key.as_str()));
            Ok(fields)
        }
        other => Err(DomainError::Validation(format!(
            "{entity} body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Row types and the mapping between the relational model and `domains`.

use chrono::{DateTime, Utc};
use domains::{Comment, DomainError, Fields, Post};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub(crate) struct PostRow {
    pub id: String,
    pub fields: Json<Fields>,
    pub upvotes: i64,
    pub comment_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub(crate) struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub fields: Json<Fields>,
    pub upvotes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            fields: row.fields.0,
            upvotes: row.upvotes,
            comments: row.comment_ids,
            created_at: row.created_at,
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            fields: row.fields.0,
            upvotes: row.upvotes,
            post: row.post_id,
            created_at: row.created_at,
        }
    }
}

/// Check-constraint violations are schema failures; everything else is infrastructure.
pub(crate) fn storage_error(err: sqlx::Error) -> DomainError {
    if let Some(db) = err.as_database_error() {
        if db.is_check_violation() {
            return DomainError::Validation(db.message().to_string());
        }
    }
    DomainError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_row_maps_comment_ids_in_order() {
        let mut fields = Fields::new();
        fields.insert("title".into(), json!("Hello"));
        let row = PostRow {
            id: "p1".into(),
            fields: Json(fields.clone()),
            upvotes: 3,
            comment_ids: vec!["c2".into(), "c1".into()],
            created_at: Utc::now(),
        };

        let post = Post::from(row);
        assert_eq!(post.fields, fields);
        assert_eq!(post.upvotes, 3);
        assert_eq!(post.comments, ["c2", "c1"]);
    }

    #[test]
    fn non_database_errors_are_storage_failures() {
        let err = storage_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DomainError::Storage(_)));
    }
}

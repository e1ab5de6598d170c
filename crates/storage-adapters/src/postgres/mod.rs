//! # PgStore
//!
//! PostgreSQL implementation of both repository ports.
//! Content members live in a JSONB column; a post's comment list is a TEXT[]
//! so that linking a comment stays a separate write from storing it.

mod rows;

use async_trait::async_trait;
use domains::{
    Comment, CommentRepository, DomainError, NewComment, NewPost, Post, PostRepository, Result,
};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

use rows::{storage_error, CommentRow, PostRow};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Opens the pool and brings the schema up to date.
    pub async fn connect(url: &str, max_connections: u32) -> std::result::Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        MIGRATOR.run(&pool).await?;
        info!(max_connections, "postgres store ready");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl PostRepository for PgStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, fields, upvotes, comment_ids, created_at FROM posts ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn insert_post(&self, new: NewPost) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (id, fields) VALUES ($1, $2) \
             RETURNING id, fields, upvotes, comment_ids, created_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(Json(new.fields))
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(row.into())
    }

    async fn find_post(&self, id: &str) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, fields, upvotes, comment_ids, created_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(row.map(Post::from))
    }

    async fn increment_post_upvotes(&self, id: &str) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            "UPDATE posts SET upvotes = upvotes + 1 WHERE id = $1 \
             RETURNING id, fields, upvotes, comment_ids, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        row.map(Post::from)
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    async fn append_comment(&self, post_id: &str, comment_id: &str) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            "UPDATE posts SET comment_ids = array_append(comment_ids, $2) WHERE id = $1 \
             RETURNING id, fields, upvotes, comment_ids, created_at",
        )
        .bind(post_id)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        row.map(Post::from)
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }
}

#[async_trait]
impl CommentRepository for PgStore {
    async fn insert_comment(&self, post_id: &str, new: NewComment) -> Result<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO comments (id, post_id, fields) VALUES ($1, $2, $3) \
             RETURNING id, post_id, fields, upvotes, created_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(post_id)
        .bind(Json(new.fields))
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            let dangling = err
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation());
            if dangling {
                DomainError::post_not_found(post_id)
            } else {
                storage_error(err)
            }
        })?;
        Ok(row.into())
    }

    async fn find_comment(&self, id: &str) -> Result<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, fields, upvotes, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(row.map(Comment::from))
    }

    async fn find_comments(&self, ids: &[String]) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, fields, upvotes, created_at FROM comments WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn increment_comment_upvotes(&self, id: &str) -> Result<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            "UPDATE comments SET upvotes = upvotes + 1 WHERE id = $1 \
             RETURNING id, post_id, fields, upvotes, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        row.map(Comment::from)
            .ok_or_else(|| DomainError::comment_not_found(id))
    }
}

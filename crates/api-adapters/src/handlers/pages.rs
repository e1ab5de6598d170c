//! Non-API pages: the landing page and a liveness probe.

use askama::Template;
use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;

pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint { method: "GET", path: "/posts", summary: "List every post" },
    Endpoint { method: "POST", path: "/posts", summary: "Create a post" },
    Endpoint { method: "GET", path: "/posts/{post}", summary: "Fetch a post with its comments" },
    Endpoint { method: "PUT", path: "/posts/{post}/upvote", summary: "Upvote a post" },
    Endpoint { method: "POST", path: "/posts/{post}/comments", summary: "Comment on a post" },
    Endpoint {
        method: "PUT",
        path: "/posts/{post}/comments/{comment}/upvote",
        summary: "Upvote a comment",
    },
];

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    title: &'a str,
    version: &'a str,
    endpoints: &'a [Endpoint],
}

/// `GET /`
pub async fn index() -> Result<Html<String>, ApiError> {
    let page = IndexTemplate {
        title: "rusty-forum",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    };
    Ok(Html(page.render()?))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

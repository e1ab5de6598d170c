use axum::http::{header, Method, StatusCode};
use integration_tests::{send, test_app};
use serde_json::json;

#[tokio::test]
async fn landing_page_lists_the_endpoints() {
    let response = send(&test_app(), Method::GET, "/", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let content_type = response.headers[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let html = response.body.as_str().unwrap();
    assert!(html.contains("rusty-forum"));
    assert!(html.contains("/posts/{post}/comments/{comment}/upvote"));
}

#[tokio::test]
async fn health_reports_ok() {
    let response = send(&test_app(), Method::GET, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn every_response_carries_a_request_id() {
    let app = test_app();
    for uri in ["/posts", "/posts/missing"] {
        let response = send(&app, Method::GET, uri, None).await;
        let request_id = response.headers.get("x-request-id").expect("x-request-id header");
        assert!(!request_id.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn unknown_routes_and_methods_are_rejected() {
    let response = send(&test_app(), Method::DELETE, "/posts", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    let response = send(&test_app(), Method::GET, "/threads", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

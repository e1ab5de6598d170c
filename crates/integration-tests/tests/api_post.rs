use axum::http::{Method, StatusCode};
use integration_tests::{create_post, id_of, send, send_raw, test_app};
use serde_json::json;

#[tokio::test]
async fn created_post_round_trips_with_id_and_no_comments() {
    let app = test_app();
    let payload = json!({ "author": "ada", "title": "Hello", "body": "First!" });

    let created = create_post(&app, payload.clone()).await;
    let id = id_of(&created);

    let fetched = send(&app, Method::GET, &format!("/posts/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    for key in ["author", "title", "body"] {
        assert_eq!(fetched.body[key], payload[key], "member {key}");
    }
    assert_eq!(fetched.body["id"], json!(id));
    assert_eq!(fetched.body["upvotes"], json!(0));
    assert_eq!(fetched.body["comments"], json!([]));
}

#[tokio::test]
async fn upvotes_accumulate_one_per_call() {
    let app = test_app();
    let id = id_of(&create_post(&app, json!({ "title": "Hello" })).await);
    let uri = format!("/posts/{id}/upvote");

    for expected in 1..=5 {
        let response = send(&app, Method::PUT, &uri, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["upvotes"], json!(expected));
        assert_eq!(response.body["title"], json!("Hello"));
    }
}

#[tokio::test]
async fn unknown_post_is_an_error_not_an_empty_ok() {
    let app = test_app();

    for (method, uri) in [
        (Method::GET, "/posts/does-not-exist"),
        (Method::PUT, "/posts/does-not-exist/upvote"),
    ] {
        let response = send(&app, method, uri, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error_code(), Some("not_found"));
        assert_eq!(
            response.body["error"]["message"],
            json!("post not found with ID does-not-exist")
        );
    }
}

#[tokio::test]
async fn listing_is_stable_and_in_creation_order() {
    let app = test_app();
    for title in ["one", "two", "three"] {
        create_post(&app, json!({ "title": title })).await;
    }

    let first = send(&app, Method::GET, "/posts", None).await;
    let second = send(&app, Method::GET, "/posts", None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);

    let titles: Vec<_> = first
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|post| post["title"].clone())
        .collect();
    assert_eq!(titles, [json!("one"), json!("two"), json!("three")]);
}

#[tokio::test]
async fn empty_store_lists_no_posts() {
    let response = send(&test_app(), Method::GET, "/posts", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn store_managed_members_in_the_body_are_ignored() {
    let app = test_app();
    let created = create_post(
        &app,
        json!({ "title": "Hello", "id": "mine", "upvotes": 1000, "comments": ["x"] }),
    )
    .await;

    assert_ne!(created["id"], json!("mine"));
    assert_eq!(created["upvotes"], json!(0));
    assert_eq!(created["comments"], json!([]));
}

#[tokio::test]
async fn non_object_body_fails_store_validation() {
    let response = send(&test_app(), Method::POST, "/posts", Some(json!([1, 2, 3]))).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.error_code(), Some("validation_error"));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let response = send_raw(
        &test_app(),
        Method::POST,
        "/posts",
        Some(("application/json", "{\"title\": ".to_string())),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("invalid_request"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let big = "x".repeat(integration_tests::MAX_BODY_BYTES + 1);
    let response = send(&test_app(), Method::POST, "/posts", Some(json!({ "body": big }))).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
}

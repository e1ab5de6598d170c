use axum::http::{Method, StatusCode};
use integration_tests::{create_comment, create_post, id_of, send, test_app};
use serde_json::json;

#[tokio::test]
async fn hello_nice_scenario() {
    let app = test_app();

    let post = create_post(&app, json!({ "title": "Hello" })).await;
    assert_eq!(post["upvotes"], json!(0));
    let post_id = id_of(&post);

    let upvoted = send(&app, Method::PUT, &format!("/posts/{post_id}/upvote"), None).await;
    assert_eq!(upvoted.body["upvotes"], json!(1));

    let comment = create_comment(&app, &post_id, json!({ "text": "Nice" })).await;
    assert_eq!(comment["text"], json!("Nice"));
    assert_eq!(comment["post"], json!(post_id));
    assert_eq!(comment["upvotes"], json!(0));

    let detail = send(&app, Method::GET, &format!("/posts/{post_id}"), None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["upvotes"], json!(1));
    let comments = detail.body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], json!("Nice"));
    assert_eq!(comments[0]["id"], comment["id"]);
}

#[tokio::test]
async fn comments_only_show_under_their_own_post() {
    let app = test_app();
    let a = id_of(&create_post(&app, json!({ "title": "A" })).await);
    let b = id_of(&create_post(&app, json!({ "title": "B" })).await);

    create_comment(&app, &a, json!({ "text": "first" })).await;
    create_comment(&app, &a, json!({ "text": "second" })).await;

    let detail_a = send(&app, Method::GET, &format!("/posts/{a}"), None).await;
    let texts: Vec<_> = detail_a.body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].clone())
        .collect();
    assert_eq!(texts, [json!("first"), json!("second")]);

    let detail_b = send(&app, Method::GET, &format!("/posts/{b}"), None).await;
    assert_eq!(detail_b.body["comments"], json!([]));
}

#[tokio::test]
async fn listing_shows_comment_references_not_comments() {
    let app = test_app();
    let post_id = id_of(&create_post(&app, json!({ "title": "Hello" })).await);
    let comment_id = id_of(&create_comment(&app, &post_id, json!({ "text": "Nice" })).await);

    let listed = send(&app, Method::GET, "/posts", None).await;
    assert_eq!(listed.body[0]["comments"], json!([comment_id]));
}

#[tokio::test]
async fn comment_upvotes_accumulate() {
    let app = test_app();
    let post_id = id_of(&create_post(&app, json!({ "title": "Hello" })).await);
    let comment_id = id_of(&create_comment(&app, &post_id, json!({ "text": "Nice" })).await);
    let uri = format!("/posts/{post_id}/comments/{comment_id}/upvote");

    for expected in 1..=3 {
        let response = send(&app, Method::PUT, &uri, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["upvotes"], json!(expected));
    }

    let detail = send(&app, Method::GET, &format!("/posts/{post_id}"), None).await;
    assert_eq!(detail.body["comments"][0]["upvotes"], json!(3));
    assert_eq!(detail.body["upvotes"], json!(0));
}

#[tokio::test]
async fn commenting_on_unknown_post_is_not_found() {
    let response = send(
        &test_app(),
        Method::POST,
        "/posts/missing/comments",
        Some(json!({ "text": "Nice" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("not_found"));
}

#[tokio::test]
async fn unknown_comment_is_not_found() {
    let app = test_app();
    let post_id = id_of(&create_post(&app, json!({ "title": "Hello" })).await);

    let uri = format!("/posts/{post_id}/comments/missing/upvote");
    let response = send(&app, Method::PUT, &uri, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["error"]["message"],
        json!("comment not found with ID missing")
    );
}

#[tokio::test]
async fn post_resolves_before_comment() {
    let response = send(
        &test_app(),
        Method::PUT,
        "/posts/missing-post/comments/missing-comment/upvote",
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body["error"]["message"],
        json!("post not found with ID missing-post")
    );
}

#[tokio::test]
async fn comment_can_be_upvoted_through_another_post() {
    let app = test_app();
    let owner = id_of(&create_post(&app, json!({ "title": "owner" })).await);
    let other = id_of(&create_post(&app, json!({ "title": "other" })).await);
    let comment_id = id_of(&create_comment(&app, &owner, json!({ "text": "Nice" })).await);

    let uri = format!("/posts/{other}/comments/{comment_id}/upvote");
    let response = send(&app, Method::PUT, &uri, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["upvotes"], json!(1));
    assert_eq!(response.body["post"], json!(owner));
}

#[tokio::test]
async fn comment_body_must_be_an_object() {
    let app = test_app();
    let post_id = id_of(&create_post(&app, json!({ "title": "Hello" })).await);

    let uri = format!("/posts/{post_id}/comments");
    let response = send(&app, Method::POST, &uri, Some(json!("Nice"))).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let detail = send(&app, Method::GET, &format!("/posts/{post_id}"), None).await;
    assert_eq!(detail.body["comments"], json!([]));
}

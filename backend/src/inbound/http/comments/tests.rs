//! Tests for the comments handlers.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{
    TestBackend, assert_error_body, assert_validation_details, send_json, test_app, test_backend,
};

const NO_BODY: Option<&Value> = None;

/// Seed alice (1), bob (2) and a post by alice (1).
async fn seed<S>(app: &S)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    for name in ["alice", "bob"] {
        let user = json!({
            "username": name,
            "email": format!("{name}@x.com"),
            "password": "secret1",
        });
        let (status, _) = send_json(app, Method::POST, "/api/v1/users", Some(&user)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let post = json!({"title": "Hi", "content": "Body", "authorId": 1});
    let (status, _) = send_json(app, Method::POST, "/api/v1/posts", Some(&post)).await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn comment<S>(app: &S, content: &str, author_id: i64, post_id: i64) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let body = json!({"content": content, "authorId": author_id, "postId": post_id});
    send_json(app, Method::POST, "/api/v1/comments", Some(&body)).await
}

fn contents(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .filter_map(|comment| comment.get("content").and_then(Value::as_str))
        .collect()
}

#[actix_web::test]
async fn create_comment_flattens_author_and_post() {
    let app = test::init_service(test_app(test_backend().state)).await;
    seed(&app).await;

    let (status, body) = comment(&app, "Nice", 2, 1).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "content": "Nice",
            "createdAt": "2024-03-01T09:30:00Z",
            "authorId": 2,
            "authorUsername": "bob",
            "postId": 1,
        })
    );
}

#[rstest]
#[case(99, 1, "Author not found")]
#[case(1, 99, "Post not found")]
#[case(99, 99, "Author not found")]
#[actix_web::test]
async fn unknown_references_are_bad_requests(
    #[case] author_id: i64,
    #[case] post_id: i64,
    #[case] message: &str,
) {
    let app = test::init_service(test_app(test_backend().state)).await;
    seed(&app).await;

    let (status, body) = comment(&app, "Nice", author_id, post_id).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error_body(&body, "invalid_request", message);
    let (_, listed) = send_json(&app, Method::GET, "/api/v1/comments/post/1", NO_BODY).await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[case(json!({"authorId": 1, "postId": 1}), "content", "missing_field")]
#[case(json!({"content": " ", "authorId": 1, "postId": 1}), "content", "empty_value")]
#[case(json!({"content": "Nice", "postId": 1}), "authorId", "missing_field")]
#[case(json!({"content": "Nice", "authorId": 1}), "postId", "missing_field")]
#[actix_web::test]
async fn invalid_comment_bodies_are_rejected(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = test::init_service(test_app(test_backend().state)).await;
    seed(&app).await;

    let (status, body) = send_json(&app, Method::POST, "/api/v1/comments", Some(&payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_validation_details(&body, field, code);
}

#[actix_web::test]
async fn comments_on_post_are_oldest_first() {
    let TestBackend { state, clock } = test_backend();
    let app = test::init_service(test_app(state)).await;
    seed(&app).await;
    comment(&app, "first", 1, 1).await;
    clock.advance_seconds(30);
    comment(&app, "second", 2, 1).await;

    let (status, body) = send_json(&app, Method::GET, "/api/v1/comments/post/1", NO_BODY).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(contents(&body), vec!["first", "second"]);
}

#[actix_web::test]
async fn comments_by_author_only_lists_that_author() {
    let app = test::init_service(test_app(test_backend().state)).await;
    seed(&app).await;
    comment(&app, "by alice", 1, 1).await;
    comment(&app, "by bob", 2, 1).await;

    let (status, body) =
        send_json(&app, Method::GET, "/api/v1/comments/author/2", NO_BODY).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(contents(&body), vec!["by bob"]);
}

#[actix_web::test]
async fn update_comment_only_changes_content() {
    let TestBackend { state, clock } = test_backend();
    let app = test::init_service(test_app(state)).await;
    seed(&app).await;
    let (_, created) = comment(&app, "Nice", 2, 1).await;
    clock.advance_seconds(10);
    let update = json!({"content": "Nicer"});

    let (status, updated) =
        send_json(&app, Method::PUT, "/api/v1/comments/1", Some(&update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated.get("content"), Some(&json!("Nicer")));
    for field in ["id", "createdAt", "authorId", "authorUsername", "postId"] {
        assert_eq!(updated.get(field), created.get(field), "{field} unchanged");
    }
}

#[rstest]
#[case(Method::GET)]
#[case(Method::DELETE)]
#[actix_web::test]
async fn unknown_comment_is_not_found(#[case] method: Method) {
    let app = test::init_service(test_app(test_backend().state)).await;

    let (status, body) = send_json(&app, method, "/api/v1/comments/5", NO_BODY).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error_body(&body, "not_found", "Comment not found");
}

#[actix_web::test]
async fn deleting_post_removes_its_comments() {
    let app = test::init_service(test_app(test_backend().state)).await;
    seed(&app).await;
    comment(&app, "Nice", 2, 1).await;

    let (status, _) = send_json(&app, Method::DELETE, "/api/v1/posts/1", NO_BODY).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_json(&app, Method::GET, "/api/v1/comments/1", NO_BODY).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, by_bob) = send_json(&app, Method::GET, "/api/v1/comments/author/2", NO_BODY).await;
    assert_eq!(by_bob, json!([]));
}

//! Tests for port error formatting and the entity-to-payload mapping.

use super::*;
use crate::domain::{
    AuthorRef, Comment, CommentContent, CommentId, Email, PasswordDigest, Post, PostContent,
    PostId, PostTitle, User, UserId, Username,
};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn alice() -> AuthorRef {
    AuthorRef {
        id: UserId::new(1),
        username: Username::new("alice").expect("username"),
    }
}

#[fixture]
fn created_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[rstest]
fn user_payload_omits_password() {
    let user = User::new(
        UserId::new(1),
        Username::new("alice").expect("username"),
        Email::new("a@x.com").expect("email"),
        PasswordDigest::new("$argon2id$v=19$digest"),
    );

    let payload = UserPayload::from(user);
    let value = serde_json::to_value(&payload).expect("payload serialises");

    assert_eq!(
        value,
        json!({"id": 1, "username": "alice", "email": "a@x.com"})
    );
}

#[rstest]
fn post_payload_flattens_author(alice: AuthorRef, created_at: chrono::DateTime<Utc>) {
    let post = Post::new(
        PostId::new(5),
        PostTitle::new("Hi").expect("title"),
        PostContent::new("Body").expect("content"),
        created_at,
        alice,
    );

    let value = serde_json::to_value(PostPayload::from(post)).expect("payload serialises");

    assert_eq!(
        value,
        json!({
            "id": 5,
            "title": "Hi",
            "content": "Body",
            "createdAt": "2024-03-01T09:30:00Z",
            "authorId": 1,
            "authorUsername": "alice",
        })
    );
}

#[rstest]
fn comment_payload_flattens_author_and_post(alice: AuthorRef, created_at: chrono::DateTime<Utc>) {
    let comment = Comment::new(
        CommentId::new(9),
        CommentContent::new("Nice").expect("content"),
        created_at,
        alice,
        PostId::new(5),
    );

    let payload = CommentPayload::from(comment);

    assert_eq!(payload.id, 9);
    assert_eq!(payload.content, "Nice");
    assert_eq!(payload.created_at, created_at);
    assert_eq!(payload.author_id, 1);
    assert_eq!(payload.author_username, "alice");
    assert_eq!(payload.post_id, 5);
}

#[rstest]
#[case(UniqueUserField::Email, "user email already exists")]
#[case(UniqueUserField::Username, "user username already exists")]
fn duplicate_error_names_field(#[case] field: UniqueUserField, #[case] expected: &str) {
    assert_eq!(UserRepositoryError::duplicate(field).to_string(), expected);
}

#[rstest]
fn repository_errors_render_messages() {
    assert_eq!(
        PostRepositoryError::connection("refused").to_string(),
        "post repository connection failed: refused"
    );
    assert_eq!(
        CommentRepositoryError::query("syntax").to_string(),
        "comment repository query failed: syntax"
    );
    assert_eq!(
        PasswordHasherError::hashing("bad salt").to_string(),
        "password hashing failed: bad salt"
    );
}

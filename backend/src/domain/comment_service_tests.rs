//! Tests for the comment service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockCommentRepository, MockPostRepository, MockUserRepository};
use crate::domain::{AuthorRef, CommentContent, ErrorCode, Username};
use crate::test_support::{MutableClock, fixture_timestamp};
use chrono::{DateTime, TimeDelta, Utc};
use mockall::predicate::eq;
use rstest::rstest;

struct Mocks {
    comments: MockCommentRepository,
    posts: MockPostRepository,
    users: MockUserRepository,
}

impl Mocks {
    fn new() -> Self {
        Self {
            comments: MockCommentRepository::new(),
            posts: MockPostRepository::new(),
            users: MockUserRepository::new(),
        }
    }

    fn into_service(
        self,
    ) -> CommentService<MockCommentRepository, MockPostRepository, MockUserRepository> {
        CommentService::new(
            Arc::new(self.comments),
            Arc::new(self.posts),
            Arc::new(self.users),
            Arc::new(MutableClock::new(fixture_timestamp())),
        )
    }
}

fn stored_comment(id: i64, content: &str, created_at: DateTime<Utc>) -> Comment {
    Comment::new(
        CommentId::new(id),
        CommentContent::new(content).expect("content"),
        created_at,
        AuthorRef {
            id: UserId::new(1),
            username: Username::new("alice").expect("username"),
        },
        PostId::new(1),
    )
}

fn create_request() -> CreateCommentRequest {
    CreateCommentRequest {
        content: CommentContent::new("Nice").expect("content"),
        author_id: UserId::new(1),
        post_id: PostId::new(1),
    }
}

#[rstest]
#[tokio::test]
async fn create_comment_stamps_clock_time() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_exists_by_id()
        .with(eq(UserId::new(1)))
        .times(1)
        .return_once(|_| Ok(true));
    mocks
        .posts
        .expect_exists_by_id()
        .with(eq(PostId::new(1)))
        .times(1)
        .return_once(|_| Ok(true));
    mocks
        .comments
        .expect_insert()
        .withf(|draft| draft.created_at == fixture_timestamp() && draft.content.as_ref() == "Nice")
        .times(1)
        .return_once(|draft| Ok(stored_comment(1, "Nice", draft.created_at)));

    let payload = mocks
        .into_service()
        .create_comment(create_request())
        .await
        .expect("create succeeds");

    assert_eq!(payload.id, 1);
    assert_eq!(payload.post_id, 1);
    assert_eq!(payload.author_username, "alice");
    assert_eq!(payload.created_at, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn create_comment_checks_author_before_post() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_exists_by_id()
        .times(1)
        .return_once(|_| Ok(false));
    mocks.posts.expect_exists_by_id().never();
    mocks.comments.expect_insert().never();

    let error = mocks
        .into_service()
        .create_comment(create_request())
        .await
        .expect_err("author missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Author not found");
}

#[rstest]
#[tokio::test]
async fn create_comment_rejects_unknown_post() {
    let mut mocks = Mocks::new();
    mocks.users.expect_exists_by_id().return_once(|_| Ok(true));
    mocks
        .posts
        .expect_exists_by_id()
        .times(1)
        .return_once(|_| Ok(false));
    mocks.comments.expect_insert().never();

    let error = mocks
        .into_service()
        .create_comment(create_request())
        .await
        .expect_err("post missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Post not found");
}

#[rstest]
#[tokio::test]
async fn create_comment_reports_post_removed_before_insert() {
    let mut mocks = Mocks::new();
    mocks.users.expect_exists_by_id().return_once(|_| Ok(true));
    mocks.posts.expect_exists_by_id().return_once(|_| Ok(true));
    mocks
        .comments
        .expect_insert()
        .times(1)
        .return_once(|draft| Err(CommentRepositoryError::missing_post(draft.post_id)));

    let error = mocks
        .into_service()
        .create_comment(create_request())
        .await
        .expect_err("post removed");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Post not found");
}

#[rstest]
#[tokio::test]
async fn comments_by_post_preserves_oldest_first_order() {
    let first = fixture_timestamp();
    let second = first + TimeDelta::seconds(30);
    let mut mocks = Mocks::new();
    mocks
        .comments
        .expect_list_by_post_oldest_first()
        .with(eq(PostId::new(1)))
        .times(1)
        .return_once(move |_| {
            Ok(vec![
                stored_comment(1, "First", first),
                stored_comment(2, "Second", second),
            ])
        });

    let listed = mocks
        .into_service()
        .comments_by_post(PostId::new(1))
        .await
        .expect("list succeeds");

    let bodies: Vec<_> = listed.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(bodies, ["First", "Second"]);
}

#[rstest]
#[tokio::test]
async fn comments_by_post_returns_empty_for_unknown_post() {
    let mut mocks = Mocks::new();
    mocks
        .comments
        .expect_list_by_post_oldest_first()
        .return_once(|_| Ok(Vec::new()));

    let listed = mocks
        .into_service()
        .comments_by_post(PostId::new(404))
        .await
        .expect("list succeeds");

    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn comments_by_author_maps_rows() {
    let mut mocks = Mocks::new();
    mocks
        .comments
        .expect_list_by_author()
        .with(eq(UserId::new(1)))
        .return_once(|_| Ok(vec![stored_comment(4, "Hey", fixture_timestamp())]));

    let listed = mocks
        .into_service()
        .comments_by_author(UserId::new(1))
        .await
        .expect("list succeeds");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].author_id, 1);
}

#[rstest]
#[tokio::test]
async fn get_comment_returns_not_found_for_unknown_id() {
    let mut mocks = Mocks::new();
    mocks.comments.expect_find_by_id().return_once(|_| Ok(None));

    let error = mocks
        .into_service()
        .get_comment(CommentId::new(9))
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Comment not found");
}

#[rstest]
#[tokio::test]
async fn update_comment_replaces_content_only() {
    let created_at = fixture_timestamp() - TimeDelta::hours(2);
    let mut mocks = Mocks::new();
    mocks
        .comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored_comment(1, "Nice", created_at))));
    mocks
        .comments
        .expect_update()
        .withf(move |comment| {
            comment.content().as_ref() == "Edited"
                && comment.created_at() == created_at
                && comment.post_id() == PostId::new(1)
        })
        .times(1)
        .return_once(|comment| Ok(Some(comment.clone())));

    let payload = mocks
        .into_service()
        .update_comment(UpdateCommentRequest {
            id: CommentId::new(1),
            content: CommentContent::new("Edited").expect("content"),
        })
        .await
        .expect("update succeeds");

    assert_eq!(payload.content, "Edited");
    assert_eq!(payload.created_at, created_at);
}

#[rstest]
#[tokio::test]
async fn delete_comment_rejects_unknown_id_without_deleting() {
    let mut mocks = Mocks::new();
    mocks
        .comments
        .expect_exists_by_id()
        .times(1)
        .return_once(|_| Ok(false));
    mocks.comments.expect_delete_by_id().never();

    let error = mocks
        .into_service()
        .delete_comment(CommentId::new(1))
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_comment_removes_existing_row() {
    let mut mocks = Mocks::new();
    mocks.comments.expect_exists_by_id().return_once(|_| Ok(true));
    mocks
        .comments
        .expect_delete_by_id()
        .with(eq(CommentId::new(1)))
        .times(1)
        .return_once(|_| Ok(true));

    mocks
        .into_service()
        .delete_comment(CommentId::new(1))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[case(
    CommentRepositoryError::connection("refused"),
    ErrorCode::ServiceUnavailable
)]
#[case(CommentRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[case(CommentRepositoryError::missing_author(UserId::new(1)), ErrorCode::NotFound)]
#[case(CommentRepositoryError::missing_post(PostId::new(1)), ErrorCode::NotFound)]
fn repository_errors_map_to_domain_codes(
    #[case] error: CommentRepositoryError,
    #[case] expected: ErrorCode,
) {
    assert_eq!(map_comment_repository_error(error).code(), expected);
}

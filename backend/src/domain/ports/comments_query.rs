//! Driving port for comment reads and the comment transfer shape.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Comment, CommentId, Error, PostId, UserId};

/// Boundary-facing comment representation with references flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPayload {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
    pub author_username: String,
    pub post_id: i64,
}

impl From<Comment> for CommentPayload {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id().as_i64(),
            content: value.content().as_ref().to_owned(),
            created_at: value.created_at(),
            author_id: value.author().id.as_i64(),
            author_username: value.author().username.as_ref().to_owned(),
            post_id: value.post_id().as_i64(),
        }
    }
}

/// Use-case port for reading comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Return one comment or `NotFound`.
    async fn get_comment(&self, id: CommentId) -> Result<CommentPayload, Error>;

    /// Return a post's comments, oldest first. Unknown posts yield an
    /// empty list.
    async fn comments_by_post(&self, post_id: PostId) -> Result<Vec<CommentPayload>, Error>;

    /// Return the comments written by an author.
    async fn comments_by_author(&self, author_id: UserId) -> Result<Vec<CommentPayload>, Error>;
}

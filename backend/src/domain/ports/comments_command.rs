//! Driving port for comment mutations.

use async_trait::async_trait;

use crate::domain::{CommentContent, CommentId, Error, PostId, UserId};

use super::CommentPayload;

/// Validated comment creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    pub content: CommentContent,
    pub author_id: UserId,
    pub post_id: PostId,
}

/// Validated comment update. Only the content is updatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommentRequest {
    pub id: CommentId,
    pub content: CommentContent,
}

/// Use-case port for creating, updating, and deleting comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Add a comment; `NotFound` when the author or the post is unknown,
    /// checking the author first.
    async fn create_comment(&self, request: CreateCommentRequest)
    -> Result<CommentPayload, Error>;

    /// Overwrite the content; `NotFound` when the id is unknown.
    async fn update_comment(&self, request: UpdateCommentRequest)
    -> Result<CommentPayload, Error>;

    /// Remove a comment; `NotFound` when absent.
    async fn delete_comment(&self, id: CommentId) -> Result<(), Error>;
}

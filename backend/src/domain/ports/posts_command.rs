//! Driving port for post mutations.

use async_trait::async_trait;

use crate::domain::{Error, PostContent, PostId, PostTitle, UserId};

use super::PostPayload;

/// Validated post creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostRequest {
    pub title: PostTitle,
    pub content: PostContent,
    pub author_id: UserId,
}

/// Validated post update. Author and timestamp are not updatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostRequest {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
}

/// Use-case port for creating, updating, and deleting posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Publish a post; `NotFound` ("Author not found") when the author is
    /// unknown.
    async fn create_post(&self, request: CreatePostRequest) -> Result<PostPayload, Error>;

    /// Overwrite title and content; `NotFound` when the id is unknown.
    async fn update_post(&self, request: UpdatePostRequest) -> Result<PostPayload, Error>;

    /// Remove a post and its comments; `NotFound` when absent.
    async fn delete_post(&self, id: PostId) -> Result<(), Error>;
}

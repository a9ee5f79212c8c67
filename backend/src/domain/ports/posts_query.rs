//! Driving port for post reads and the post transfer shape.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Post, PostId, UserId};

/// Boundary-facing post representation with the author flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
    pub author_username: String,
}

impl From<Post> for PostPayload {
    fn from(value: Post) -> Self {
        Self {
            id: value.id().as_i64(),
            title: value.title().as_ref().to_owned(),
            content: value.content().as_ref().to_owned(),
            created_at: value.created_at(),
            author_id: value.author().id.as_i64(),
            author_username: value.author().username.as_ref().to_owned(),
        }
    }
}

/// Use-case port for reading posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Return every post, newest first.
    async fn list_posts(&self) -> Result<Vec<PostPayload>, Error>;

    /// Return one post or `NotFound`.
    async fn get_post(&self, id: PostId) -> Result<PostPayload, Error>;

    /// Return the posts written by an author. Unknown authors yield an
    /// empty list.
    async fn posts_by_author(&self, author_id: UserId) -> Result<Vec<PostPayload>, Error>;

    /// Return posts whose title contains the fragment, ignoring case.
    async fn search_posts(&self, title_fragment: &str) -> Result<Vec<PostPayload>, Error>;
}

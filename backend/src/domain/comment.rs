//! Comment data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuthorRef, PostId, UserId};

/// Validation errors returned by the comment value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyContent,
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "content must not be empty"),
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Storage-assigned comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank comment body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    /// Validate and construct a [`CommentContent`].
    ///
    /// # Examples
    /// ```
    /// use blog_backend::domain::CommentContent;
    ///
    /// assert!(CommentContent::new("Nice").is_ok());
    /// assert!(CommentContent::new("  ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, CommentValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for CommentContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Persisted comment on a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    content: CommentContent,
    created_at: DateTime<Utc>,
    author: AuthorRef,
    post_id: PostId,
}

impl Comment {
    /// Assemble a comment from stored parts.
    pub fn new(
        id: CommentId,
        content: CommentContent,
        created_at: DateTime<Utc>,
        author: AuthorRef,
        post_id: PostId,
    ) -> Self {
        Self {
            id,
            content,
            created_at,
            author,
            post_id,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// Body text.
    pub fn content(&self) -> &CommentContent {
        &self.content
    }

    /// Creation instant; immutable after insert.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Resolved author.
    pub fn author(&self) -> &AuthorRef {
        &self.author
    }

    /// Parent post.
    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    /// Replace the body, keeping every other field.
    pub fn with_content(self, content: CommentContent) -> Self {
        Self { content, ..self }
    }
}

/// Comment draft stamped by the service and awaiting an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub content: CommentContent,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
    pub post_id: PostId,
}

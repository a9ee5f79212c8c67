//! Post data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{UserId, Username};

/// Maximum length, in characters, of a post title.
pub const POST_TITLE_MAX: usize = 255;

/// Validation errors returned by the post value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyContent,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyContent => write!(f, "content must not be empty"),
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Storage-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blank post title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// Validate and construct a [`PostTitle`].
    pub fn new(value: impl Into<String>) -> Result<Self, PostValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        if value.chars().count() > POST_TITLE_MAX {
            return Err(PostValidationError::TitleTooLong {
                max: POST_TITLE_MAX,
            });
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Non-blank post body. Length is unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Validate and construct a [`PostContent`].
    pub fn new(value: impl Into<String>) -> Result<Self, PostValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(PostValidationError::EmptyContent);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Author reference resolved from the users table at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: UserId,
    pub username: Username,
}

/// Persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    id: PostId,
    title: PostTitle,
    content: PostContent,
    created_at: DateTime<Utc>,
    author: AuthorRef,
}

impl Post {
    /// Assemble a post from stored parts.
    pub fn new(
        id: PostId,
        title: PostTitle,
        content: PostContent,
        created_at: DateTime<Utc>,
        author: AuthorRef,
    ) -> Self {
        Self {
            id,
            title,
            content,
            created_at,
            author,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Title.
    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    /// Body text.
    pub fn content(&self) -> &PostContent {
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

    /// Replace title and content, keeping identity, author, and timestamp.
    pub fn with_text(self, title: PostTitle, content: PostContent) -> Self {
        Self {
            title,
            content,
            ..self
        }
    }
}

/// Post draft stamped by the service and awaiting an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: PostContent,
    pub created_at: DateTime<Utc>,
    pub author_id: UserId,
}

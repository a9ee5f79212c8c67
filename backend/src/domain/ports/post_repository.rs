//! Port abstraction for post persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// The referenced author no longer exists at write time.
        MissingAuthor { author_id: UserId } => "post author {author_id} does not exist",
    }
}

/// Driven port for post storage.
///
/// Every returned [`Post`] carries its author's current username, resolved
/// by the adapter at read time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Return every post, newest first (ties broken by descending id).
    async fn list_newest_first(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Return posts written by the author, ordered by identifier.
    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<Post>, PostRepositoryError>;

    /// Return posts whose title contains `fragment`, ignoring case.
    async fn search_by_title(&self, fragment: &str) -> Result<Vec<Post>, PostRepositoryError>;

    /// Report whether a post with the identifier exists.
    async fn exists_by_id(&self, id: PostId) -> Result<bool, PostRepositoryError>;

    /// Persist a new post and return it with its assigned identifier.
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError>;

    /// Overwrite title and content of an existing post.
    ///
    /// Returns `None` when no row matched the identifier.
    async fn update(&self, post: &Post) -> Result<Option<Post>, PostRepositoryError>;

    /// Delete a post, cascading to its comments.
    ///
    /// Returns `false` when no row matched the identifier.
    async fn delete_by_id(&self, id: PostId) -> Result<bool, PostRepositoryError>;
}

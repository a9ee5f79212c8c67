//! Port abstraction for comment persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, NewComment, PostId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// The referenced author no longer exists at write time.
        MissingAuthor { author_id: UserId } => "comment author {author_id} does not exist",
        /// The referenced post no longer exists at write time.
        MissingPost { post_id: PostId } => "commented post {post_id} does not exist",
    }
}

/// Driven port for comment storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fetch a comment by identifier.
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Return comments on a post, oldest first (ties broken by ascending id).
    async fn list_by_post_oldest_first(
        &self,
        post_id: PostId,
    ) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Return comments written by the author, ordered by identifier.
    async fn list_by_author(&self, author_id: UserId)
    -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Report whether a comment with the identifier exists.
    async fn exists_by_id(&self, id: CommentId) -> Result<bool, CommentRepositoryError>;

    /// Persist a new comment and return it with its assigned identifier.
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Overwrite the content of an existing comment.
    ///
    /// Returns `None` when no row matched the identifier.
    async fn update(&self, comment: &Comment) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Delete a comment.
    ///
    /// Returns `false` when no row matched the identifier.
    async fn delete_by_id(&self, id: CommentId) -> Result<bool, CommentRepositoryError>;
}

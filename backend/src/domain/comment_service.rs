//! Comment domain service.
//!
//! Comments reference both a user and a post. Creation resolves the author
//! first and the post second so callers always see the same error for a
//! request that names neither.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CommentPayload, CommentRepository, CommentRepositoryError, CommentsCommand, CommentsQuery,
    CreateCommentRequest, PostRepository, UpdateCommentRequest, UserRepository,
};
use crate::domain::post_service::{AUTHOR_NOT_FOUND, POST_NOT_FOUND, map_post_repository_error};
use crate::domain::user_service::map_user_repository_error;
use crate::domain::{Comment, CommentId, Error, NewComment, PostId, UserId};

pub(crate) const COMMENT_NOT_FOUND: &str = "Comment not found";

/// Comment service implementing [`CommentsQuery`] and [`CommentsCommand`].
#[derive(Clone)]
pub struct CommentService<C, P, U> {
    comments: Arc<C>,
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, P, U> CommentService<C, P, U> {
    /// Create a new service with the given repositories and clock.
    pub fn new(comments: Arc<C>, posts: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            posts,
            users,
            clock,
        }
    }
}

/// Map comment repository failures onto domain errors.
pub(crate) fn map_comment_repository_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::MissingAuthor { .. } => Error::not_found(AUTHOR_NOT_FOUND),
        CommentRepositoryError::MissingPost { .. } => Error::not_found(POST_NOT_FOUND),
    }
}

fn into_payloads(comments: Vec<Comment>) -> Vec<CommentPayload> {
    comments.into_iter().map(CommentPayload::from).collect()
}

#[async_trait]
impl<C, P, U> CommentsQuery for CommentService<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    async fn get_comment(&self, id: CommentId) -> Result<CommentPayload, Error> {
        self.comments
            .find_by_id(id)
            .await
            .map_err(map_comment_repository_error)?
            .map(CommentPayload::from)
            .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND))
    }

    async fn comments_by_post(&self, post_id: PostId) -> Result<Vec<CommentPayload>, Error> {
        let comments = self
            .comments
            .list_by_post_oldest_first(post_id)
            .await
            .map_err(map_comment_repository_error)?;
        Ok(into_payloads(comments))
    }

    async fn comments_by_author(&self, author_id: UserId) -> Result<Vec<CommentPayload>, Error> {
        let comments = self
            .comments
            .list_by_author(author_id)
            .await
            .map_err(map_comment_repository_error)?;
        Ok(into_payloads(comments))
    }
}

#[async_trait]
impl<C, P, U> CommentsCommand for CommentService<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    async fn create_comment(
        &self,
        request: CreateCommentRequest,
    ) -> Result<CommentPayload, Error> {
        let CreateCommentRequest {
            content,
            author_id,
            post_id,
        } = request;

        let author_exists = self
            .users
            .exists_by_id(author_id)
            .await
            .map_err(map_user_repository_error)?;
        if !author_exists {
            debug!(author_id = %author_id, "comment rejected: author not found");
            return Err(Error::not_found(AUTHOR_NOT_FOUND));
        }

        let post_exists = self
            .posts
            .exists_by_id(post_id)
            .await
            .map_err(map_post_repository_error)?;
        if !post_exists {
            debug!(post_id = %post_id, "comment rejected: post not found");
            return Err(Error::not_found(POST_NOT_FOUND));
        }

        let comment = self
            .comments
            .insert(&NewComment {
                content,
                created_at: self.clock.utc(),
                author_id,
                post_id,
            })
            .await
            .map_err(map_comment_repository_error)?;

        info!(comment_id = %comment.id(), post_id = %post_id, "comment created");
        Ok(CommentPayload::from(comment))
    }

    async fn update_comment(
        &self,
        request: UpdateCommentRequest,
    ) -> Result<CommentPayload, Error> {
        let UpdateCommentRequest { id, content } = request;

        let existing = self
            .comments
            .find_by_id(id)
            .await
            .map_err(map_comment_repository_error)?
            .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND))?;

        let updated = self
            .comments
            .update(&existing.with_content(content))
            .await
            .map_err(map_comment_repository_error)?
            .ok_or_else(|| Error::not_found(COMMENT_NOT_FOUND))?;

        info!(comment_id = %id, "comment updated");
        Ok(CommentPayload::from(updated))
    }

    async fn delete_comment(&self, id: CommentId) -> Result<(), Error> {
        let exists = self
            .comments
            .exists_by_id(id)
            .await
            .map_err(map_comment_repository_error)?;
        if !exists {
            debug!(comment_id = %id, "delete rejected: comment not found");
            return Err(Error::not_found(COMMENT_NOT_FOUND));
        }

        let deleted = self
            .comments
            .delete_by_id(id)
            .await
            .map_err(map_comment_repository_error)?;
        if !deleted {
            return Err(Error::not_found(COMMENT_NOT_FOUND));
        }

        info!(comment_id = %id, "comment deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;

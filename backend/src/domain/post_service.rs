//! Post domain service.
//!
//! Implements the post driving ports. Authors are resolved through the user
//! repository before anything is written; creation timestamps come from the
//! injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CreatePostRequest, PostPayload, PostRepository, PostRepositoryError, PostsCommand, PostsQuery,
    UpdatePostRequest, UserRepository,
};
use crate::domain::user_service::map_user_repository_error;
use crate::domain::{Error, NewPost, PostId, UserId};

pub(crate) const POST_NOT_FOUND: &str = "Post not found";
pub(crate) const AUTHOR_NOT_FOUND: &str = "Author not found";

/// Post service implementing [`PostsQuery`] and [`PostsCommand`].
#[derive(Clone)]
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PostService<P, U> {
    /// Create a new service with the given repositories and clock.
    pub fn new(posts: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }
}

/// Map post repository failures onto domain errors.
pub(crate) fn map_post_repository_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
        PostRepositoryError::MissingAuthor { .. } => Error::not_found(AUTHOR_NOT_FOUND),
    }
}

fn into_payloads(posts: Vec<crate::domain::Post>) -> Vec<PostPayload> {
    posts.into_iter().map(PostPayload::from).collect()
}

#[async_trait]
impl<P, U> PostsQuery for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn list_posts(&self) -> Result<Vec<PostPayload>, Error> {
        let posts = self
            .posts
            .list_newest_first()
            .await
            .map_err(map_post_repository_error)?;
        Ok(into_payloads(posts))
    }

    async fn get_post(&self, id: PostId) -> Result<PostPayload, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_post_repository_error)?
            .map(PostPayload::from)
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
    }

    async fn posts_by_author(&self, author_id: UserId) -> Result<Vec<PostPayload>, Error> {
        let posts = self
            .posts
            .find_by_author(author_id)
            .await
            .map_err(map_post_repository_error)?;
        Ok(into_payloads(posts))
    }

    async fn search_posts(&self, title_fragment: &str) -> Result<Vec<PostPayload>, Error> {
        let posts = self
            .posts
            .search_by_title(title_fragment)
            .await
            .map_err(map_post_repository_error)?;
        Ok(into_payloads(posts))
    }
}

#[async_trait]
impl<P, U> PostsCommand for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<PostPayload, Error> {
        let CreatePostRequest {
            title,
            content,
            author_id,
        } = request;

        let author = self
            .users
            .find_by_id(author_id)
            .await
            .map_err(map_user_repository_error)?;
        if author.is_none() {
            debug!(author_id = %author_id, "post rejected: author not found");
            return Err(Error::not_found(AUTHOR_NOT_FOUND));
        }

        let post = self
            .posts
            .insert(&NewPost {
                title,
                content,
                created_at: self.clock.utc(),
                author_id,
            })
            .await
            .map_err(map_post_repository_error)?;

        info!(post_id = %post.id(), author_id = %author_id, "post created");
        Ok(PostPayload::from(post))
    }

    async fn update_post(&self, request: UpdatePostRequest) -> Result<PostPayload, Error> {
        let UpdatePostRequest { id, title, content } = request;

        let existing = self
            .posts
            .find_by_id(id)
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))?;

        let updated = self
            .posts
            .update(&existing.with_text(title, content))
            .await
            .map_err(map_post_repository_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))?;

        info!(post_id = %id, "post updated");
        Ok(PostPayload::from(updated))
    }

    async fn delete_post(&self, id: PostId) -> Result<(), Error> {
        let exists = self
            .posts
            .exists_by_id(id)
            .await
            .map_err(map_post_repository_error)?;
        if !exists {
            debug!(post_id = %id, "delete rejected: post not found");
            return Err(Error::not_found(POST_NOT_FOUND));
        }

        let deleted = self
            .posts
            .delete_by_id(id)
            .await
            .map_err(map_post_repository_error)?;
        if !deleted {
            return Err(Error::not_found(POST_NOT_FOUND));
        }

        info!(post_id = %id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;

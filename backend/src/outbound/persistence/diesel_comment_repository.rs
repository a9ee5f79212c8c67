//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, CommentContent, CommentId, NewComment, PostId, UserId};

use super::diesel_basic_error_mapping::{
    foreign_key_violation_constraint, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_post_repository::author_ref;
use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{comments, users};

/// Diesel-backed implementation of the [`CommentRepository`] port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const POST_FOREIGN_KEY: &str = "comments_post_id_fkey";

fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    map_basic_pool_error(error, CommentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn row_to_comment(
    row: CommentRow,
    author_username: String,
) -> Result<Comment, CommentRepositoryError> {
    let content = CommentContent::new(row.content)
        .map_err(|err| CommentRepositoryError::query(format!("stored content invalid: {err}")))?;
    let author =
        author_ref(row.author_id, author_username).map_err(CommentRepositoryError::query)?;
    Ok(Comment::new(
        CommentId::new(row.id),
        content,
        row.created_at,
        author,
        PostId::new(row.post_id),
    ))
}

fn rows_to_comments(
    rows: Vec<(CommentRow, String)>,
) -> Result<Vec<Comment>, CommentRepositoryError> {
    rows.into_iter()
        .map(|(row, username)| row_to_comment(row, username))
        .collect()
}

async fn load_author_username<C>(
    conn: &mut C,
    author_id: i64,
) -> Result<String, CommentRepositoryError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    users::table
        .find(author_id)
        .select(users::username)
        .first(conn)
        .await
        .map_err(map_diesel_error)
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(CommentRow, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::id.eq(id.as_i64()))
            .select((CommentRow::as_select(), users::username))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(row, username)| row_to_comment(row, username))
            .transpose()
    }

    async fn list_by_post_oldest_first(
        &self,
        post_id: PostId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(CommentRow, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::post_id.eq(post_id.as_i64()))
            .order((comments::created_at.asc(), comments::id.asc()))
            .select((CommentRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_comments(rows)
    }

    async fn list_by_author(
        &self,
        author_id: UserId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(CommentRow, String)> = comments::table
            .inner_join(users::table)
            .filter(comments::author_id.eq(author_id.as_i64()))
            .order(comments::id.asc())
            .select((CommentRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_comments(rows)
    }

    async fn exists_by_id(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(comments::table.find(id.as_i64())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCommentRow {
            content: comment.content.as_ref(),
            created_at: comment.created_at,
            author_id: comment.author_id.as_i64(),
            post_id: comment.post_id.as_i64(),
        };

        let row: CommentRow = diesel::insert_into(comments::table)
            .values(&new_row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match foreign_key_violation_constraint(&err) {
                Some(POST_FOREIGN_KEY) => CommentRepositoryError::missing_post(comment.post_id),
                Some(_) => CommentRepositoryError::missing_author(comment.author_id),
                None => map_diesel_error(err),
            })?;
        let username = load_author_username(&mut conn, row.author_id).await?;

        row_to_comment(row, username)
    }

    async fn update(&self, comment: &Comment) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CommentRow> = diesel::update(comments::table.find(comment.id().as_i64()))
            .set(comments::content.eq(comment.content().as_ref()))
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => {
                let username = load_author_username(&mut conn, row.author_id).await?;
                row_to_comment(row, username).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(comments::table.find(id.as_i64()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

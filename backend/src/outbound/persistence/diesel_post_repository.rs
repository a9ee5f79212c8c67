//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Posts are always read joined with their author so the domain receives the
//! author's username alongside the identifier.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{AuthorRef, NewPost, Post, PostContent, PostId, PostTitle, UserId, Username};

use super::diesel_basic_error_mapping::{
    foreign_key_violation_constraint, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewPostRow, PostRow, PostTextUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

/// Escape `LIKE` metacharacters so the fragment matches literally.
pub(super) fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build a domain author reference from stored columns.
pub(super) fn author_ref(id: i64, username: String) -> Result<AuthorRef, String> {
    let username =
        Username::new(username).map_err(|err| format!("stored author username invalid: {err}"))?;
    Ok(AuthorRef {
        id: UserId::new(id),
        username,
    })
}

fn row_to_post(row: PostRow, author_username: String) -> Result<Post, PostRepositoryError> {
    let title = PostTitle::new(row.title)
        .map_err(|err| PostRepositoryError::query(format!("stored title invalid: {err}")))?;
    let content = PostContent::new(row.content)
        .map_err(|err| PostRepositoryError::query(format!("stored content invalid: {err}")))?;
    let author = author_ref(row.author_id, author_username).map_err(PostRepositoryError::query)?;
    Ok(Post::new(
        PostId::new(row.id),
        title,
        content,
        row.created_at,
        author,
    ))
}

fn rows_to_posts(rows: Vec<(PostRow, String)>) -> Result<Vec<Post>, PostRepositoryError> {
    rows.into_iter()
        .map(|(row, username)| row_to_post(row, username))
        .collect()
}

async fn load_author_username<C>(conn: &mut C, author_id: i64) -> Result<String, PostRepositoryError>
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
impl PostRepository for DieselPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PostRow, String)> = posts::table
            .inner_join(users::table)
            .order((posts::created_at.desc(), posts::id.desc()))
            .select((PostRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_posts(rows)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<(PostRow, String)> = posts::table
            .inner_join(users::table)
            .filter(posts::id.eq(id.as_i64()))
            .select((PostRow::as_select(), users::username))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(row, username)| row_to_post(row, username))
            .transpose()
    }

    async fn find_by_author(&self, author_id: UserId) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PostRow, String)> = posts::table
            .inner_join(users::table)
            .filter(posts::author_id.eq(author_id.as_i64()))
            .order(posts::id.asc())
            .select((PostRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_posts(rows)
    }

    async fn search_by_title(&self, title_fragment: &str) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = format!("%{}%", escape_like(title_fragment));

        let rows: Vec<(PostRow, String)> = posts::table
            .inner_join(users::table)
            .filter(posts::title.ilike(pattern))
            .order((posts::created_at.desc(), posts::id.desc()))
            .select((PostRow::as_select(), users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_posts(rows)
    }

    async fn exists_by_id(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(posts::table.find(id.as_i64())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPostRow {
            title: post.title.as_ref(),
            content: post.content.as_ref(),
            created_at: post.created_at,
            author_id: post.author_id.as_i64(),
        };

        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match foreign_key_violation_constraint(&err) {
                Some(_) => PostRepositoryError::missing_author(post.author_id),
                None => map_diesel_error(err),
            })?;
        let username = load_author_username(&mut conn, row.author_id).await?;

        row_to_post(row, username)
    }

    async fn update(&self, post: &Post) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = PostTextUpdate {
            title: post.title().as_ref(),
            content: post.content().as_ref(),
        };

        let row: Option<PostRow> = diesel::update(posts::table.find(post.id().as_i64()))
            .set(&changes)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => {
                let username = load_author_username(&mut conn, row.author_id).await?;
                row_to_post(row, username).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(posts::table.find(id.as_i64()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_timestamp;
    use rstest::rstest;

    #[rstest]
    #[case("rust", "rust")]
    #[case("100%", "100\\%")]
    #[case("snake_case", "snake\\_case")]
    #[case("back\\slash", "back\\\\slash")]
    fn escape_like_quotes_metacharacters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }

    #[rstest]
    fn row_converts_with_author_username() {
        let row = PostRow {
            id: 3,
            title: "Hi".to_owned(),
            content: "Body".to_owned(),
            created_at: fixture_timestamp(),
            author_id: 1,
        };

        let post = row_to_post(row, "alice".to_owned()).expect("valid row");

        assert_eq!(post.id(), PostId::new(3));
        assert_eq!(post.author().username.as_ref(), "alice");
        assert_eq!(post.created_at(), fixture_timestamp());
    }

    #[rstest]
    fn blank_stored_title_is_a_query_error() {
        let row = PostRow {
            id: 3,
            title: " ".to_owned(),
            content: "Body".to_owned(),
            created_at: fixture_timestamp(),
            author_id: 1,
        };

        let error = row_to_post(row, "alice".to_owned()).expect_err("invalid row");
        assert!(matches!(error, PostRepositoryError::Query { .. }));
    }
}

//! Posts API handlers.
//!
//! ```text
//! GET    /api/v1/posts
//! GET    /api/v1/posts/{id}
//! GET    /api/v1/posts/author/{authorId}
//! GET    /api/v1/posts/search?title=fragment
//! POST   /api/v1/posts {"title":"Hi","content":"Body","authorId":1}
//! PUT    /api/v1/posts/{id} {"title":"Hi","content":"Body"}
//! DELETE /api/v1/posts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreatePostRequest, PostPayload, UpdatePostRequest};
use crate::domain::{PostId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::reference_not_found_as_bad_request;
use crate::inbound::http::schemas::{ErrorSchema, PostSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{AUTHOR_ID, parse_post_content, parse_post_title, required};

/// Request body for `POST /api/v1/posts`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    #[schema(example = "Hi")]
    pub title: Option<String>,
    #[schema(example = "Body")]
    pub content: Option<String>,
    #[schema(example = 1)]
    pub author_id: Option<i64>,
}

/// Request body for `PUT /api/v1/posts/{id}`. The author cannot be changed.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostBody {
    #[schema(example = "Hi")]
    pub title: Option<String>,
    #[schema(example = "Body")]
    pub content: Option<String>,
}

/// Query string for title search. A missing fragment matches every post.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive fragment of the title.
    pub title: Option<String>,
}

fn parse_create(body: CreatePostBody) -> ApiResult<CreatePostRequest> {
    Ok(CreatePostRequest {
        title: parse_post_title(body.title)?,
        content: parse_post_content(body.content)?,
        author_id: UserId::new(required(body.author_id, AUTHOR_ID)?),
    })
}

fn parse_update(id: i64, body: UpdatePostBody) -> ApiResult<UpdatePostRequest> {
    Ok(UpdatePostRequest {
        id: PostId::new(id),
        title: parse_post_title(body.title)?,
        content: parse_post_content(body.content)?,
    })
}

/// List every post, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "Posts", body = [PostSchema]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostPayload>>> {
    Ok(web::Json(state.posts.list_posts().await?))
}

/// Search posts by title fragment, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/posts/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching posts", body = [PostSchema]),
        (status = 400, description = "Malformed query string", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "searchPosts"
)]
#[get("/posts/search")]
pub async fn search_posts(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<PostPayload>>> {
    let fragment = query.into_inner().title.unwrap_or_default();
    Ok(web::Json(state.posts.search_posts(&fragment).await?))
}

/// List posts written by one author.
#[utoipa::path(
    get,
    path = "/api/v1/posts/author/{authorId}",
    params(("authorId" = i64, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Posts by the author", body = [PostSchema]),
        (status = 400, description = "Malformed identifier", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "postsByAuthor"
)]
#[get("/posts/author/{author_id}")]
pub async fn posts_by_author(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<PostPayload>>> {
    let author_id = UserId::new(path.into_inner());
    Ok(web::Json(state.posts.posts_by_author(author_id).await?))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<PostPayload>> {
    let post = state.posts.get_post(PostId::new(path.into_inner())).await?;
    Ok(web::Json(post))
}

/// Publish a post. An unknown author is reported as a bad request.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostBody,
    responses(
        (status = 201, description = "Post created", body = PostSchema),
        (status = 400, description = "Invalid request or unknown author", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePostBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create(payload.into_inner())?;
    let post = state
        .posts_command
        .create_post(request)
        .await
        .map_err(reference_not_found_as_bad_request)?;
    Ok(HttpResponse::Created().json(post))
}

/// Replace a post's title and content.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = UpdatePostBody,
    responses(
        (status = 200, description = "Post updated", body = PostSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdatePostBody>,
) -> ApiResult<web::Json<PostPayload>> {
    let request = parse_update(path.into_inner(), payload.into_inner())?;
    Ok(web::Json(state.posts_command.update_post(request).await?))
}

/// Delete a post and its comments.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 404, description = "Post not found", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .posts_command
        .delete_post(PostId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

//! Comments API handlers.
//!
//! Comments are not offered as a bare collection; they are listed per post or
//! per author.
//!
//! ```text
//! GET    /api/v1/comments/{id}
//! GET    /api/v1/comments/post/{postId}
//! GET    /api/v1/comments/author/{authorId}
//! POST   /api/v1/comments {"content":"Nice","authorId":1,"postId":1}
//! PUT    /api/v1/comments/{id} {"content":"Nicer"}
//! DELETE /api/v1/comments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CommentPayload, CreateCommentRequest, UpdateCommentRequest};
use crate::domain::{CommentId, PostId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::reference_not_found_as_bad_request;
use crate::inbound::http::schemas::{CommentSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{AUTHOR_ID, POST_ID, parse_comment_content, required};

/// Request body for `POST /api/v1/comments`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentBody {
    #[schema(example = "Nice")]
    pub content: Option<String>,
    #[schema(example = 1)]
    pub author_id: Option<i64>,
    #[schema(example = 1)]
    pub post_id: Option<i64>,
}

/// Request body for `PUT /api/v1/comments/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentBody {
    #[schema(example = "Nicer")]
    pub content: Option<String>,
}

fn parse_create(body: CreateCommentBody) -> ApiResult<CreateCommentRequest> {
    Ok(CreateCommentRequest {
        content: parse_comment_content(body.content)?,
        author_id: UserId::new(required(body.author_id, AUTHOR_ID)?),
        post_id: PostId::new(required(body.post_id, POST_ID)?),
    })
}

/// Fetch one comment.
#[utoipa::path(
    get,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment identifier")),
    responses(
        (status = 200, description = "Comment", body = CommentSchema),
        (status = 404, description = "Comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "getComment"
)]
#[get("/comments/{id}")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<CommentPayload>> {
    let comment = state
        .comments
        .get_comment(CommentId::new(path.into_inner()))
        .await?;
    Ok(web::Json(comment))
}

/// List the comments on a post, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/comments/post/{postId}",
    params(("postId" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Comments on the post", body = [CommentSchema]),
        (status = 400, description = "Malformed identifier", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "commentsByPost"
)]
#[get("/comments/post/{post_id}")]
pub async fn comments_by_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<CommentPayload>>> {
    let post_id = PostId::new(path.into_inner());
    Ok(web::Json(state.comments.comments_by_post(post_id).await?))
}

/// List the comments written by one author.
#[utoipa::path(
    get,
    path = "/api/v1/comments/author/{authorId}",
    params(("authorId" = i64, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Comments by the author", body = [CommentSchema]),
        (status = 400, description = "Malformed identifier", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "commentsByAuthor"
)]
#[get("/comments/author/{author_id}")]
pub async fn comments_by_author(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<CommentPayload>>> {
    let author_id = UserId::new(path.into_inner());
    Ok(web::Json(state.comments.comments_by_author(author_id).await?))
}

/// Comment on a post. An unknown author or post is reported as a bad request.
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentBody,
    responses(
        (status = 201, description = "Comment created", body = CommentSchema),
        (status = 400, description = "Invalid request, unknown author or unknown post", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCommentBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create(payload.into_inner())?;
    let comment = state
        .comments_command
        .create_comment(request)
        .await
        .map_err(reference_not_found_as_bad_request)?;
    Ok(HttpResponse::Created().json(comment))
}

/// Replace a comment's content.
#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment identifier")),
    request_body = UpdateCommentBody,
    responses(
        (status = 200, description = "Comment updated", body = CommentSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "updateComment"
)]
#[put("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateCommentBody>,
) -> ApiResult<web::Json<CommentPayload>> {
    let request = UpdateCommentRequest {
        id: CommentId::new(path.into_inner()),
        content: parse_comment_content(payload.into_inner().content)?,
    };
    Ok(web::Json(state.comments_command.update_comment(request).await?))
}

/// Delete a comment.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment identifier")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .comments_command
        .delete_comment(CommentId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;

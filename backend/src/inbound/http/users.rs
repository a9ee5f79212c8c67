//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users {"username":"alice","email":"a@x.com","password":"secret1"}
//! PUT    /api/v1/users/{id} {"username":"alice","email":"a@x.com"}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserId;
use crate::domain::ports::{CreateUserRequest, UpdateUserRequest, UserPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_email, parse_password, parse_username};

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    /// Plaintext password; hashed before storage and never returned.
    #[schema(example = "secret1")]
    pub password: Option<String>,
}

/// Request body for `PUT /api/v1/users/{id}`. Passwords cannot be changed here.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    #[schema(example = "alice")]
    pub username: Option<String>,
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
}

fn parse_create(body: CreateUserBody) -> ApiResult<CreateUserRequest> {
    Ok(CreateUserRequest {
        username: parse_username(body.username)?,
        email: parse_email(body.email)?,
        password: parse_password(body.password)?,
    })
}

fn parse_update(id: i64, body: UpdateUserBody) -> ApiResult<UpdateUserRequest> {
    Ok(UpdateUserRequest {
        id: UserId::new(id),
        username: parse_username(body.username)?,
        email: parse_email(body.email)?,
    })
}

/// List every user, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserPayload>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserPayload>> {
    let user = state.users.get_user(UserId::new(path.into_inner())).await?;
    Ok(web::Json(user))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email or username already exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create(payload.into_inner())?;
    let user = state.users_command.create_user(request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Replace a user's username and email.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "User updated", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Email or username already exists", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<UserPayload>> {
    let request = parse_update(path.into_inner(), payload.into_inner())?;
    let user = state.users_command.update_user(request).await?;
    Ok(web::Json(user))
}

/// Delete a user together with their posts and comments.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .users_command
        .delete_user(UserId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

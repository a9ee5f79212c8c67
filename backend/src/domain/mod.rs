//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed blog entities used by the API and
//! persistence layers, together with the services that enforce referential
//! and uniqueness rules across them. Keep types immutable and document
//! invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Post, Comment: stored entities and their validated fields.
//! - UserService, PostService, CommentService: driving port implementations.

pub mod comment;
mod comment_service;
pub mod error;
pub mod ports;
pub mod post;
mod post_service;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::comment::{
    Comment, CommentContent, CommentId, CommentValidationError, NewComment,
};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::post::{
    AuthorRef, NewPost, POST_TITLE_MAX, Post, PostContent, PostId, PostTitle,
    PostValidationError,
};
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, NewUser, PASSWORD_MIN, Password, PasswordDigest, USER_FIELD_MAX, User, UserId,
    UserValidationError, Username,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use blog_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

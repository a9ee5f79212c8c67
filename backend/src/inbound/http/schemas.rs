//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain
//! counterparts but live in the inbound adapter layer where framework
//! concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation or names a missing reference.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The addressed resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A unique field is already taken.
    #[schema(rename = "conflict")]
    Conflict,
    /// Storage is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "User not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field and code of a validation or uniqueness failure.
    #[schema(example = json!({"field": "email", "code": "duplicate"}))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::ports::UserPayload`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::UserPayload)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Storage-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    /// Unique handle.
    #[schema(example = "alice")]
    username: String,
    /// Unique email address.
    #[schema(example = "a@x.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::ports::PostPayload`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::PostPayload)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PostSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Hi")]
    title: String,
    #[schema(example = "Body")]
    content: String,
    /// Creation instant, RFC 3339 UTC.
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T09:30:00Z")]
    created_at: String,
    #[schema(example = 1)]
    author_id: i64,
    #[schema(example = "alice")]
    author_username: String,
}

/// OpenAPI schema for [`crate::domain::ports::CommentPayload`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::CommentPayload)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CommentSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Nice")]
    content: String,
    /// Creation instant, RFC 3339 UTC.
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T09:30:00Z")]
    created_at: String,
    #[schema(example = 1)]
    author_id: i64,
    #[schema(example = "alice")]
    author_username: String,
    #[schema(example = 1)]
    post_id: i64,
}

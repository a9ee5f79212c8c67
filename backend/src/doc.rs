//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every users, posts, comments and health endpoint
//! - **Schemas**: wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`UserSchema`], [`PostSchema`], [`CommentSchema`]) that describe the
//!   wire payloads without coupling domain types to utoipa
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::comments::{CreateCommentBody, UpdateCommentBody};
use crate::inbound::http::posts::{CreatePostBody, UpdatePostBody};
use crate::inbound::http::schemas::{
    CommentSchema, ErrorCodeSchema, ErrorSchema, PostSchema, UserSchema,
};
use crate::inbound::http::users::{CreateUserBody, UpdateUserBody};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog backend API",
        description = "HTTP interface for users, their posts and comments on posts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::search_posts,
        crate::inbound::http::posts::posts_by_author,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::comments::get_comment,
        crate::inbound::http::comments::comments_by_post,
        crate::inbound::http::comments::comments_by_author,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::update_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        PostSchema,
        CommentSchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateUserBody,
        UpdateUserBody,
        CreatePostBody,
        UpdatePostBody,
        CreateCommentBody,
        UpdateCommentBody,
    )),
    tags(
        (name = "users", description = "Account registration and profiles"),
        (name = "posts", description = "Posts and title search"),
        (name = "comments", description = "Comments on posts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_SCHEMA_NAME: &str = "crate.domain.ports.UserPayload";
    const POST_SCHEMA_NAME: &str = "crate.domain.ports.PostPayload";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, &["code", "message", "traceId", "details"])]
    #[case(USER_SCHEMA_NAME, &["id", "username", "email"])]
    #[case(POST_SCHEMA_NAME, &["id", "title", "content", "createdAt", "authorId", "authorUsername"])]
    fn registered_schemas_have_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get(name)
            .unwrap_or_else(|| panic!("{name} schema"));

        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/api/v1/users")]
    #[case("/api/v1/users/{id}")]
    #[case("/api/v1/posts")]
    #[case("/api/v1/posts/search")]
    #[case("/api/v1/posts/author/{authorId}")]
    #[case("/api/v1/comments")]
    #[case("/api/v1/comments/post/{postId}")]
    #[case("/api/v1/comments/author/{authorId}")]
    #[case("/health/ready")]
    fn document_lists_endpoint(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[test]
    fn create_user_body_documents_password() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let body = schemas.get("CreateUserBody").expect("CreateUserBody schema");

        assert_object_schema_has_field(body, "password");
    }
}

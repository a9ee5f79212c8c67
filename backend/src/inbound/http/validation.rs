//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies arrive as optional strings so a missing field and a blank
//! one produce distinct `details.code` values. Domain constructor failures
//! are translated here into `InvalidRequest` errors naming the camelCase
//! field that was rejected.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{
    CommentContent, CommentValidationError, Email, Error, Password, PostContent, PostTitle,
    PostValidationError, UserValidationError, Username,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyValue,
    TooLong,
    TooShort,
    InvalidEmail,
    InvalidBody,
    InvalidPath,
    InvalidQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyValue => "empty_value",
            ErrorCode::TooLong => "too_long",
            ErrorCode::TooShort => "too_short",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidPath => "invalid_path",
            ErrorCode::InvalidQuery => "invalid_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const TITLE: FieldName = FieldName::new("title");
pub(crate) const CONTENT: FieldName = FieldName::new("content");
pub(crate) const AUTHOR_ID: FieldName = FieldName::new("authorId");
pub(crate) const POST_ID: FieldName = FieldName::new("postId");

fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Unwrap an optional body field or report it as missing.
pub(crate) fn required<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

fn user_validation_error(field: FieldName, err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::EmptyUsername
        | UserValidationError::EmptyEmail
        | UserValidationError::EmptyPassword => ErrorCode::EmptyValue,
        UserValidationError::UsernameTooLong { .. } | UserValidationError::EmailTooLong { .. } => {
            ErrorCode::TooLong
        }
        UserValidationError::InvalidEmail => ErrorCode::InvalidEmail,
        UserValidationError::PasswordTooShort { .. } => ErrorCode::TooShort,
    };
    field_error(field, code, err.to_string())
}

fn post_validation_error(field: FieldName, err: PostValidationError) -> Error {
    let code = match err {
        PostValidationError::EmptyTitle | PostValidationError::EmptyContent => {
            ErrorCode::EmptyValue
        }
        PostValidationError::TitleTooLong { .. } => ErrorCode::TooLong,
    };
    field_error(field, code, err.to_string())
}

fn comment_validation_error(field: FieldName, err: CommentValidationError) -> Error {
    match err {
        CommentValidationError::EmptyContent => {
            field_error(field, ErrorCode::EmptyValue, err.to_string())
        }
    }
}

pub(crate) fn parse_username(value: Option<String>) -> Result<Username, Error> {
    Username::new(required(value, USERNAME)?).map_err(|err| user_validation_error(USERNAME, err))
}

pub(crate) fn parse_email(value: Option<String>) -> Result<Email, Error> {
    Email::new(required(value, EMAIL)?).map_err(|err| user_validation_error(EMAIL, err))
}

pub(crate) fn parse_password(value: Option<String>) -> Result<Password, Error> {
    Password::new(required(value, PASSWORD)?).map_err(|err| user_validation_error(PASSWORD, err))
}

pub(crate) fn parse_post_title(value: Option<String>) -> Result<PostTitle, Error> {
    PostTitle::new(required(value, TITLE)?).map_err(|err| post_validation_error(TITLE, err))
}

pub(crate) fn parse_post_content(value: Option<String>) -> Result<PostContent, Error> {
    PostContent::new(required(value, CONTENT)?).map_err(|err| post_validation_error(CONTENT, err))
}

pub(crate) fn parse_comment_content(value: Option<String>) -> Result<CommentContent, Error> {
    CommentContent::new(required(value, CONTENT)?)
        .map_err(|err| comment_validation_error(CONTENT, err))
}

fn extractor_error(code: ErrorCode, message: String) -> actix_web::Error {
    debug!(code = code.as_str(), %message, "request rejected by extractor");
    Error::invalid_request(message)
        .with_details(json!({ "code": code.as_str() }))
        .into()
}

/// JSON extractor configuration reporting malformed bodies in the API error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        extractor_error(ErrorCode::InvalidBody, format!("invalid JSON body: {err}"))
    })
}

/// Path extractor configuration reporting malformed identifiers in the API error shape.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        extractor_error(ErrorCode::InvalidPath, format!("invalid path parameter: {err}"))
    })
}

/// Query extractor configuration reporting malformed query strings in the API error shape.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        extractor_error(ErrorCode::InvalidQuery, format!("invalid query string: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    fn detail_code(error: &Error) -> Option<&str> {
        error.details().and_then(|d| d.get("code")).and_then(Value::as_str)
    }

    fn detail_field(error: &Error) -> Option<&str> {
        error.details().and_then(|d| d.get("field")).and_then(Value::as_str)
    }

    #[rstest]
    fn missing_fields_are_reported_by_name() {
        let error = parse_username(None).expect_err("missing");

        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(error.message(), "missing required field: username");
        assert_eq!(detail_field(&error), Some("username"));
        assert_eq!(detail_code(&error), Some("missing_field"));
    }

    #[rstest]
    #[case(parse_username(Some("  ".into())).map(|_| ()), "username", "empty_value")]
    #[case(parse_username(Some("u".repeat(256))).map(|_| ()), "username", "too_long")]
    #[case(parse_email(Some("not-an-email".into())).map(|_| ()), "email", "invalid_email")]
    #[case(parse_password(Some("12345".into())).map(|_| ()), "password", "too_short")]
    #[case(parse_post_title(Some(String::new())).map(|_| ()), "title", "empty_value")]
    #[case(parse_post_content(Some(" ".into())).map(|_| ()), "content", "empty_value")]
    #[case(parse_comment_content(Some(String::new())).map(|_| ()), "content", "empty_value")]
    fn domain_rejections_carry_field_and_code(
        #[case] result: Result<(), Error>,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = result.expect_err("rejected");

        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(detail_field(&error), Some(field));
        assert_eq!(detail_code(&error), Some(code));
    }

    #[rstest]
    fn valid_values_pass_through() {
        let username = parse_username(Some("alice".into())).expect("valid username");
        let email = parse_email(Some("a@x.com".into())).expect("valid email");

        assert_eq!(username.as_ref(), "alice");
        assert_eq!(email.as_ref(), "a@x.com");
    }
}

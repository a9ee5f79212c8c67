//! Test helpers for inbound HTTP components.
//!
//! Handlers are exercised through the real services over the in-memory
//! store, with a frozen clock and a hasher cheap enough for tight loops.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde::Serialize;
use serde_json::Value;

use crate::Trace;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{CommentService, Password, PasswordDigest, PostService, UserService};
use crate::inbound::http::routes;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryBlogStore;
use crate::test_support::{MutableClock, fixture_timestamp};

/// Hasher producing a recognisable non-plaintext digest.
pub struct StubHasher;

impl PasswordHasher for StubHasher {
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHasherError> {
        Ok(PasswordDigest::new(format!(
            "stub${}",
            password.expose().len()
        )))
    }
}

/// Handler state plus the clock driving its timestamps.
pub struct TestBackend {
    pub state: HttpState,
    pub clock: Arc<MutableClock>,
}

/// Wire the real services over a fresh in-memory store.
pub fn test_backend() -> TestBackend {
    let store = Arc::new(InMemoryBlogStore::new());
    let clock = Arc::new(MutableClock::new(fixture_timestamp()));
    let state = HttpState::from_services(
        Arc::new(UserService::new(store.clone(), Arc::new(StubHasher))),
        Arc::new(PostService::new(store.clone(), store.clone(), clock.clone())),
        Arc::new(CommentService::new(
            store.clone(),
            store.clone(),
            store,
            clock.clone(),
        )),
    );
    TestBackend { state, clock }
}

/// Build the routed application around the given state.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(routes::configure)
}

/// Send a JSON request and return the status with the decoded body.
///
/// Empty bodies decode to `Value::Null`.
pub async fn send_json<S>(
    app: &S,
    method: actix_web::http::Method,
    uri: &str,
    body: Option<&impl Serialize>,
) -> (actix_web::http::StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::default().method(method).uri(uri);
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, value)
}

/// Assert the standard error envelope.
pub fn assert_error_body(body: &Value, code: &str, message: &str) {
    assert_eq!(body.get("code").and_then(Value::as_str), Some(code));
    assert_eq!(body.get("message").and_then(Value::as_str), Some(message));
    assert!(
        body.get("traceId").and_then(Value::as_str).is_some(),
        "error payload carries the request trace id"
    );
}

/// Assert the `details` field/code pair of a validation error.
pub fn assert_validation_details(body: &Value, field: &str, code: &str) {
    let details = body
        .get("details")
        .and_then(Value::as_object)
        .expect("details present");
    assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
}

//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, and response compression.

use std::time::Duration;

use axum::{body::Body, http::Request};
use tracing::Span;
use uuid::Uuid;

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Root span for each HTTP request, tagged with a fresh request id.
///
/// Only the method and path are recorded; bodies and headers may carry
/// envelope material and are never attached.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %Uuid::new_v4(),
    )
}

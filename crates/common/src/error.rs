//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::AuthenticationFailed`] → 422
/// - [`ServiceError::Conflict`] → 409
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The envelope was malformed: bad base64, bad PEM, wrong curve, or a
    /// plaintext that is not JSON.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The envelope's tag did not match the ciphertext.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The envelope reused an ephemeral key that was already seen.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::AuthenticationFailed(_) => 422,
            ServiceError::Conflict(_) => 409,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in [`crate::protocol::ErrorResponse`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::AuthenticationFailed(_) => "authentication_failed",
            ServiceError::Conflict(_) => "ephemeral_key_reused",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

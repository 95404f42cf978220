//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{DecryptResponse, ErrorResponse, HealthResponse};
use common::{EncryptedPayload, ServiceError};
use tracing::{info, warn};

use super::state::AppState;
use crate::crypto::DecryptError;
use crate::reuse::Sighting;

/// Curve of every receiver key this service accepts.
const CURVE: &str = "P-256";

/// `POST /decrypt`: authenticate and decrypt an ECIES card envelope.
///
/// Responds with the decrypted JSON document under `payload`. The plaintext
/// is never logged.
pub async fn decrypt(
    State(state): State<AppState>,
    body: Result<Json<EncryptedPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => {
            let err = ErrorResponse::new("bad_request", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(err)).into_response();
        }
    };

    match open_envelope(&state, &payload) {
        Ok(document) => {
            (StatusCode::OK, Json(DecryptResponse { payload: document })).into_response()
        }
        Err(err) => error_response(&err),
    }
}

/// `GET /health`: liveness check.
///
/// The receiver key is loaded before the listener binds, so a responding
/// server is always ready.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        curve: CURVE.into(),
        ephemeral_keys_tracked: state.ephemeral_keys.len(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Envelope handling
// ---------------------------------------------------------------------------

/// Decrypt `payload`, then apply the ephemeral key reuse policy.
///
/// Only envelopes that pass MAC verification are recorded, so forged traffic
/// cannot fill the tracker.
fn open_envelope(
    state: &AppState,
    payload: &EncryptedPayload,
) -> Result<serde_json::Value, ServiceError> {
    let opened = state.decryptor.decrypt(payload).map_err(|e| {
        warn!(error_kind = e.kind().as_str(), "envelope rejected");
        ServiceError::from(e)
    })?;

    if state.ephemeral_keys.record(&opened.ephemeral_key) == Sighting::Repeat {
        warn!(
            rejected = state.reject_reused_ephemeral_keys,
            "sender reused an ephemeral public key"
        );
        if state.reject_reused_ephemeral_keys {
            return Err(ServiceError::Conflict(
                "ephemeral public key was already used for another envelope".into(),
            ));
        }
    }

    info!("envelope decrypted");
    Ok(opened.document)
}

impl From<DecryptError> for ServiceError {
    fn from(err: DecryptError) -> Self {
        match err {
            DecryptError::Decode(_) | DecryptError::KeyParse(_) | DecryptError::CurveMismatch => {
                ServiceError::BadRequest(err.to_string())
            }
            DecryptError::Authentication => ServiceError::AuthenticationFailed(err.to_string()),
            DecryptError::KeyDerivation => ServiceError::Internal(err.to_string()),
        }
    }
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}

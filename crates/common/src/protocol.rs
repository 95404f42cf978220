//! Request and response types exchanged with the decryptor service.
//!
//! The envelope field names follow the payments platform's camelCase wire
//! format; everything else is snake_case.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// An ECIES envelope as delivered by the payments platform.
///
/// Also the request body for `POST /decrypt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPayload {
    /// Base64 AES-256-CTR ciphertext.
    pub encrypted_message: String,
    /// PEM-encoded (`PUBLIC KEY`) ephemeral P-256 key of the sender.
    pub ephemeral_public_key: String,
    /// Base64 truncated HMAC-SHA256 over the ciphertext.
    pub tag: String,
}

/// Successful response body for `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    /// The authenticated, decrypted JSON document.
    pub payload: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status; always `"ok"` once the server is accepting.
    pub status: String,
    /// Curve of the loaded receiver key.
    pub curve: String,
    /// Number of ephemeral key fingerprints currently remembered.
    pub ephemeral_keys_tracked: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_uses_camel_case_fields() {
        let body = json!({
            "encryptedMessage": "AAAA",
            "ephemeralPublicKey": "-----BEGIN PUBLIC KEY-----",
            "tag": "BBBB",
        });
        let payload: EncryptedPayload = serde_json::from_value(body).unwrap();
        assert_eq!(payload.encrypted_message, "AAAA");
        assert_eq!(payload.tag, "BBBB");

        let back = serde_json::to_value(&payload).unwrap();
        assert!(back.get("ephemeralPublicKey").is_some());
        assert!(back.get("ephemeral_public_key").is_none());
    }

    #[test]
    fn payload_rejects_missing_tag() {
        let body = json!({"encryptedMessage": "AAAA", "ephemeralPublicKey": "x"});
        assert!(serde_json::from_value::<EncryptedPayload>(body).is_err());
    }

    #[test]
    fn error_response_from_service_error() {
        let e = ErrorResponse::from(&crate::ServiceError::Conflict("seen before".into()));
        assert_eq!(e.code, "ephemeral_key_reused");
        assert!(e.message.contains("seen before"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            curve: "P-256".into(),
            ephemeral_keys_tracked: 3,
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.ephemeral_keys_tracked, 3);
        assert_eq!(decoded.curve, "P-256");
    }
}

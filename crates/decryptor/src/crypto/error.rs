//! Errors produced by the decryption pipeline.

use thiserror::Error;

/// Errors produced by the decryption pipeline.
///
/// Every variant is terminal for the call that raised it. None of them
/// carries key, tag, ciphertext or plaintext bytes.
#[derive(Debug, Error)]
pub enum DecryptError {
    /// Malformed base64 in an envelope field, or a plaintext that is not
    /// UTF-8 JSON.
    #[error("decode failed: {0}")]
    Decode(&'static str),

    /// The ephemeral public key PEM could not be parsed.
    #[error("invalid ephemeral public key: {0}")]
    KeyParse(&'static str),

    /// The ephemeral public key is not a point on P-256.
    #[error("ephemeral public key is not on the expected curve")]
    CurveMismatch,

    /// The supplied tag does not match the ciphertext.
    #[error("message authentication code mismatch")]
    Authentication,

    /// HKDF refused to expand the shared secret.
    #[error("key derivation failed")]
    KeyDerivation,
}

/// Fieldless mirror of [`DecryptError`], suitable for log fields and metric labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    KeyParse,
    CurveMismatch,
    Authentication,
    KeyDerivation,
}

impl ErrorKind {
    /// Stable snake_case label.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Decode => "decode",
            ErrorKind::KeyParse => "key_parse",
            ErrorKind::CurveMismatch => "curve_mismatch",
            ErrorKind::Authentication => "authentication",
            ErrorKind::KeyDerivation => "key_derivation",
        }
    }
}

impl DecryptError {
    /// The kind of failure, without its detail message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecryptError::Decode(_) => ErrorKind::Decode,
            DecryptError::KeyParse(_) => ErrorKind::KeyParse,
            DecryptError::CurveMismatch => ErrorKind::CurveMismatch,
            DecryptError::Authentication => ErrorKind::Authentication,
            DecryptError::KeyDerivation => ErrorKind::KeyDerivation,
        }
    }
}

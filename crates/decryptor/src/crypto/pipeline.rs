//! The end-to-end envelope decryption pipeline.
//!
//! ```text
//! Start ─► Decoded ─► SharedSecretComputed ─► KeysDerived ─► MacVerified ─► Decrypted ─► Parsed
//!   │         │                │                   │              │             │
//!   └─────────┴────────────────┴───────────────────┴──────────────┴─────────────┴─► Failed(ErrorKind)
//! ```
//!
//! Every stage runs once, in order. The tag is verified before a single byte
//! of ciphertext is decrypted, and nothing from a failed call is returned.

use common::EncryptedPayload;

use super::cipher::decrypt_json;
use super::codec;
use super::ecdh::{KeyAgreement, P256KeyAgreement, ReceiverKey};
use super::error::DecryptError;
use super::kdf::derive_keys;
use super::mac::verify_tag;

/// A successfully authenticated and decrypted envelope.
#[derive(Debug)]
pub struct Opened<P> {
    /// The decrypted JSON document.
    pub document: serde_json::Value,
    /// The sender's parsed ephemeral key.
    pub ephemeral_key: P,
}

/// Decrypts envelopes sealed to a single receiver key.
///
/// Holds only read-only state, so one instance can serve any number of
/// concurrent calls.
///
/// # Caller responsibility
///
/// The scheme uses a fixed all-zero CTR IV. Confidentiality depends on every
/// sender generating a fresh ephemeral key pair per envelope. This type cannot
/// detect reuse on its own.
#[derive(Debug, Clone)]
pub struct Decryptor<K = P256KeyAgreement> {
    agreement: K,
}

impl Decryptor<P256KeyAgreement> {
    /// Build a P-256 decryptor for `receiver`.
    pub fn for_receiver(receiver: ReceiverKey) -> Self {
        Self::new(P256KeyAgreement::new(receiver))
    }
}

impl<K: KeyAgreement> Decryptor<K> {
    pub fn new(agreement: K) -> Self {
        Self { agreement }
    }

    /// Authenticate and decrypt `payload` into its JSON document.
    ///
    /// The parsed ephemeral key is returned alongside the document so callers
    /// can track reuse by key rather than by encoding.
    ///
    /// # Errors
    ///
    /// - [`DecryptError::Decode`]: malformed base64, or plaintext that is not UTF-8 JSON.
    /// - [`DecryptError::KeyParse`] / [`DecryptError::CurveMismatch`]: unusable ephemeral key.
    /// - [`DecryptError::Authentication`]: tag mismatch; the ciphertext is never decrypted.
    pub fn decrypt(
        &self,
        payload: &EncryptedPayload,
    ) -> Result<Opened<K::PublicKey>, DecryptError> {
        let ciphertext = codec::decode(&payload.encrypted_message, "encryptedMessage")?;
        let tag = codec::decode(&payload.tag, "tag")?;

        let ephemeral = self.agreement.parse_public_key(&payload.ephemeral_public_key)?;
        let shared_secret = self.agreement.shared_secret(&ephemeral);

        let keys = derive_keys(shared_secret.as_bytes())?;
        drop(shared_secret);

        verify_tag(keys.mac_key(), &ciphertext, &tag)?;

        let document = decrypt_json(keys.cipher_key(), &ciphertext)?;
        Ok(Opened {
            document,
            ephemeral_key: ephemeral,
        })
    }
}

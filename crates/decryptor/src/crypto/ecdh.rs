//! Receiver key handling and ECDH against the sender's ephemeral key.
//!
//! The parse-then-multiply capability is the [`KeyAgreement`] trait so the
//! rest of the pipeline never touches curve types directly.

use p256::elliptic_curve::sec1::FromEncodedPoint;
use p256::pkcs8::spki::SubjectPublicKeyInfoRef;
use p256::pkcs8::{DecodePrivateKey, ObjectIdentifier};
use p256::{EncodedPoint, PublicKey, SecretKey};
use thiserror::Error;
use zeroize::Zeroizing;

use super::codec;
use super::error::DecryptError;

/// Byte length of a P-256 field element, and so of the shared secret.
pub const P256_FIELD_LEN: usize = 32;

/// `id-ecPublicKey` (RFC 5480).
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// `secp256r1` / `prime256v1`.
const P256_CURVE_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");

const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// DER body of a `PUBLIC KEY` PEM block.
///
/// Unlike RFC 7468 strict parsing, line wrapping inside the body is ignored:
/// 64-column, 76-column and single-line bodies all decode.
fn public_key_der(pem: &str) -> Result<Vec<u8>, DecryptError> {
    let (label, rest) = pem
        .trim()
        .strip_prefix("-----BEGIN ")
        .and_then(|rest| rest.split_once("-----"))
        .ok_or(DecryptError::KeyParse("not a PEM document"))?;
    if label != PUBLIC_KEY_LABEL {
        return Err(DecryptError::KeyParse("expected a PUBLIC KEY PEM block"));
    }
    let body = rest
        .strip_suffix("-----END PUBLIC KEY-----")
        .ok_or(DecryptError::KeyParse("missing PEM end boundary"))?;

    let body: String = body.split_whitespace().collect();
    codec::decode(&body, "ephemeralPublicKey")
        .map_err(|_| DecryptError::KeyParse("malformed PEM base64"))
}

/// Raw ECDH output: the x-coordinate of the shared point. Zeroed on drop.
pub struct SharedSecret(Zeroizing<Vec<u8>>);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SharedSecret {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

/// Parsing of a sender's ephemeral public key and agreement with the
/// receiver's static key.
#[cfg_attr(test, mockall::automock(type PublicKey = ();))]
pub trait KeyAgreement {
    /// Parsed ephemeral public key.
    type PublicKey;

    /// Parse a PEM-encoded ephemeral public key.
    ///
    /// # Errors
    ///
    /// [`DecryptError::KeyParse`] for malformed input,
    /// [`DecryptError::CurveMismatch`] for a key that is not on the receiver's curve.
    fn parse_public_key(&self, pem: &str) -> Result<Self::PublicKey, DecryptError>;

    /// Multiply the receiver's scalar with `public_key`.
    fn shared_secret(&self, public_key: &Self::PublicKey) -> SharedSecret;
}

/// Error loading the receiver's static private key.
#[derive(Debug, Error)]
#[error("receiver private key is not a PEM-encoded P-256 key (SEC1 or PKCS#8)")]
pub struct InvalidReceiverKey;

/// The receiver's long-lived P-256 private key.
///
/// Loaded once at startup and shared read-only. The underlying scalar is
/// zeroed when the last clone is dropped.
#[derive(Clone)]
pub struct ReceiverKey(SecretKey);

impl ReceiverKey {
    /// Parse a SEC1 (`EC PRIVATE KEY`) or PKCS#8 (`PRIVATE KEY`) PEM document.
    pub fn from_pem(pem: &str) -> Result<Self, InvalidReceiverKey> {
        let pem = pem.trim();
        SecretKey::from_sec1_pem(pem)
            .or_else(|_| SecretKey::from_pkcs8_pem(pem))
            .map(Self)
            .map_err(|_| InvalidReceiverKey)
    }

    /// The matching public key, which senders encrypt to.
    pub fn public_key(&self) -> PublicKey {
        self.0.public_key()
    }
}

impl From<SecretKey> for ReceiverKey {
    fn from(key: SecretKey) -> Self {
        Self(key)
    }
}

impl std::fmt::Debug for ReceiverKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ReceiverKey([REDACTED])")
    }
}

/// [`KeyAgreement`] on NIST P-256.
#[derive(Clone, Debug)]
pub struct P256KeyAgreement {
    receiver: ReceiverKey,
}

impl P256KeyAgreement {
    pub fn new(receiver: ReceiverKey) -> Self {
        Self { receiver }
    }
}

impl KeyAgreement for P256KeyAgreement {
    type PublicKey = PublicKey;

    fn parse_public_key(&self, pem: &str) -> Result<PublicKey, DecryptError> {
        let der = public_key_der(pem)?;
        let spki = SubjectPublicKeyInfoRef::try_from(der.as_slice())
            .map_err(|_| DecryptError::KeyParse("malformed SubjectPublicKeyInfo"))?;
        if spki.algorithm.oid != EC_PUBLIC_KEY_OID {
            return Err(DecryptError::KeyParse("not an elliptic-curve key"));
        }
        let curve = spki
            .algorithm
            .parameters_oid()
            .map_err(|_| DecryptError::KeyParse("missing named curve"))?;
        if curve != P256_CURVE_OID {
            return Err(DecryptError::CurveMismatch);
        }

        let point_bytes = spki
            .subject_public_key
            .as_bytes()
            .ok_or(DecryptError::KeyParse("malformed point bit string"))?;
        let point = EncodedPoint::from_bytes(point_bytes)
            .map_err(|_| DecryptError::KeyParse("malformed SEC1 point"))?;

        // Well-formed encoding whose coordinates do not satisfy the curve
        // equation, or the identity.
        Option::<PublicKey>::from(PublicKey::from_encoded_point(&point))
            .ok_or(DecryptError::CurveMismatch)
    }

    fn shared_secret(&self, public_key: &PublicKey) -> SharedSecret {
        let shared =
            p256::ecdh::diffie_hellman(self.receiver.0.to_nonzero_scalar(), public_key.as_affine());
        let x = shared.raw_secret_bytes();
        debug_assert_eq!(x.len(), P256_FIELD_LEN);
        SharedSecret::from(x.to_vec())
    }
}

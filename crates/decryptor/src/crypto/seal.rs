//! Sender-side sealing, used only to build test envelopes.

use common::EncryptedPayload;
use p256::pkcs8::{EncodePublicKey, LineEnding};
use p256::{PublicKey, SecretKey};
use rand::rngs::OsRng;

use super::cipher::apply_keystream;
use super::codec;
use super::kdf::derive_keys;
use super::mac::compute_tag;

/// Seal `document` to `receiver` under a fresh ephemeral key.
pub fn seal(document: &serde_json::Value, receiver: &PublicKey) -> EncryptedPayload {
    let ephemeral = SecretKey::random(&mut OsRng);
    let shared = p256::ecdh::diffie_hellman(ephemeral.to_nonzero_scalar(), receiver.as_affine());
    let keys = derive_keys(shared.raw_secret_bytes()).unwrap();

    let ciphertext = apply_keystream(keys.cipher_key(), document.to_string().as_bytes());
    let tag = compute_tag(keys.mac_key(), &ciphertext).unwrap();

    EncryptedPayload {
        encrypted_message: codec::encode(&ciphertext),
        ephemeral_public_key: ephemeral
            .public_key()
            .to_public_key_pem(LineEnding::LF)
            .unwrap(),
        tag: codec::encode(&tag),
    }
}

//! ECIES envelope decryption.
//!
//! This module is intentionally free of AWS, HTTP and logging dependencies.
//! It is a pure function of the receiver key and the envelope.
//!
//! # Scheme
//!
//! ```text
//! shared  = ECDH-P256(receiver_secret, ephemeral_public).x
//! okm     = HKDF-SHA256(salt = "", ikm = shared, info = "", len = 48)
//! enc_key = okm[0..32]          mac_key = okm[32..48]
//! tag     = HMAC-SHA256(mac_key, ciphertext)[0..16]
//! plain   = AES-256-CTR(enc_key, iv = 0^128, ciphertext)
//! ```

pub mod cipher;
pub mod codec;
pub mod ecdh;
pub mod error;
pub mod kdf;
pub mod mac;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
pub(crate) mod seal;

pub use ecdh::ReceiverKey;
pub use error::DecryptError;
pub use pipeline::Decryptor;

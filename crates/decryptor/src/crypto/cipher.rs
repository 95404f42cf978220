//! AES-256-CTR decryption of an authenticated ciphertext into JSON.
//!
//! **Fixed IV.** The counter block is all zeroes for every message, matching
//! what senders emit. This is only safe because every envelope is sealed
//! under a fresh ephemeral key, so no cipher key ever encrypts twice. The
//! decryptor cannot check that; it is a sender obligation.
//!
//! **Do NOT call this on ciphertext whose tag has not been verified.**

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

use super::error::DecryptError;
use super::kdf::CIPHER_KEY_LEN;

/// AES-256 in CTR mode with a 128-bit big-endian counter.
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Byte length of the CTR initial counter block.
pub const IV_LEN: usize = 16;

/// The counter block used for every envelope.
pub const ZERO_IV: [u8; IV_LEN] = [0u8; IV_LEN];

/// Apply the AES-256-CTR keystream for `cipher_key` to `data`.
///
/// CTR is symmetric, so this both encrypts and decrypts.
pub fn apply_keystream(cipher_key: &[u8; CIPHER_KEY_LEN], data: &[u8]) -> Vec<u8> {
    let mut cipher = Aes256Ctr::new(cipher_key.into(), &ZERO_IV.into());
    let mut buf = data.to_vec();
    cipher.apply_keystream(&mut buf);
    buf
}

/// Decrypt `ciphertext` and parse the result as a JSON document.
///
/// # Errors
///
/// Returns [`DecryptError::Decode`] if the plaintext is not UTF-8 or not JSON.
pub fn decrypt_json(
    cipher_key: &[u8; CIPHER_KEY_LEN],
    ciphertext: &[u8],
) -> Result<serde_json::Value, DecryptError> {
    let plaintext = Zeroizing::new(apply_keystream(cipher_key, ciphertext));
    let text = std::str::from_utf8(&plaintext)
        .map_err(|_| DecryptError::Decode("plaintext is not UTF-8"))?;
    serde_json::from_str(text).map_err(|_| DecryptError::Decode("plaintext is not JSON"))
}

//! Truncated HMAC-SHA256 over the ciphertext.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::error::DecryptError;
use super::kdf::MAC_KEY_LEN;

type HmacSha256 = Hmac<Sha256>;

/// Length of the tag carried in the envelope.
pub const TAG_LEN: usize = MAC_KEY_LEN;

/// HMAC-SHA256 of `ciphertext` under `mac_key`, truncated to [`TAG_LEN`] bytes.
pub fn compute_tag(mac_key: &[u8], ciphertext: &[u8]) -> Result<[u8; TAG_LEN], DecryptError> {
    let mut mac = HmacSha256::new_from_slice(mac_key).map_err(|_| DecryptError::KeyDerivation)?;
    mac.update(ciphertext);
    let digest = mac.finalize().into_bytes();

    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&digest[..TAG_LEN]);
    Ok(tag)
}

/// Check `tag` against the ciphertext's MAC.
///
/// The byte comparison is constant-time over all [`TAG_LEN`] bytes. A tag of
/// any other length is rejected outright; its length is public.
///
/// # Errors
///
/// Returns [`DecryptError::Authentication`] on any mismatch.
pub fn verify_tag(mac_key: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<(), DecryptError> {
    let expected = compute_tag(mac_key, ciphertext)?;
    if tag.len() != TAG_LEN {
        return Err(DecryptError::Authentication);
    }
    if bool::from(expected[..].ct_eq(tag)) {
        Ok(())
    } else {
        Err(DecryptError::Authentication)
    }
}

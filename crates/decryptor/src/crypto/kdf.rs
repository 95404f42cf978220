//! HKDF-SHA256 expansion of the ECDH shared secret into cipher and MAC keys.
//!
//! The 48-byte output is split at [`CIPHER_KEY_LEN`]: the first 32 bytes key
//! AES-256-CTR, the next [`MAC_KEY_LEN`] bytes key the HMAC. Senders derive
//! keys the same way, so this slicing must not change.

use hkdf::Hkdf;
use sha2::digest::{typenum::Unsigned, OutputSizeUser};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::DecryptError;

/// AES-256 key length.
pub const CIPHER_KEY_LEN: usize = 32;

/// Half the SHA-256 digest length. Also the length of the truncated tag.
pub const MAC_KEY_LEN: usize = <Sha256 as OutputSizeUser>::OutputSize::USIZE / 2;

/// Total HKDF output length.
pub const DERIVED_LEN: usize = CIPHER_KEY_LEN + MAC_KEY_LEN;

/// Cipher and MAC keys for a single envelope. Zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    cipher_key: [u8; CIPHER_KEY_LEN],
    mac_key: [u8; MAC_KEY_LEN],
}

impl DerivedKeys {
    pub fn cipher_key(&self) -> &[u8; CIPHER_KEY_LEN] {
        &self.cipher_key
    }

    pub fn mac_key(&self) -> &[u8; MAC_KEY_LEN] {
        &self.mac_key
    }
}

impl std::fmt::Debug for DerivedKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKeys([REDACTED])")
    }
}

/// Expand `shared_secret` with HKDF-SHA256 (empty salt, empty info).
pub fn derive_keys(shared_secret: &[u8]) -> Result<DerivedKeys, DecryptError> {
    let mut okm = expand(shared_secret)?;
    let mut keys = DerivedKeys {
        cipher_key: [0u8; CIPHER_KEY_LEN],
        mac_key: [0u8; MAC_KEY_LEN],
    };
    keys.cipher_key.copy_from_slice(&okm[..CIPHER_KEY_LEN]);
    keys.mac_key.copy_from_slice(&okm[CIPHER_KEY_LEN..DERIVED_LEN]);
    okm.zeroize();
    Ok(keys)
}

fn expand(shared_secret: &[u8]) -> Result<[u8; DERIVED_LEN], DecryptError> {
    // An absent salt is HashLen zero bytes, which HMAC treats exactly like an
    // empty salt.
    let hk = Hkdf::<Sha256>::new(None, shared_secret);
    let mut okm = [0u8; DERIVED_LEN];
    hk.expand(&[], &mut okm)
        .map_err(|_| DecryptError::KeyDerivation)?;
    Ok(okm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fixtures::{unit_secret, SHARED_SECRET_HEX, UNIT_SECRET_OKM_HEX};

    #[test]
    fn lengths_follow_sha256() {
        assert_eq!(CIPHER_KEY_LEN, 32);
        assert_eq!(MAC_KEY_LEN, 16);
        assert_eq!(DERIVED_LEN, 48);
    }

    #[test]
    fn unit_secret_matches_vector() {
        let okm = hex::decode(UNIT_SECRET_OKM_HEX).unwrap();
        assert_eq!(okm.len(), DERIVED_LEN);
        assert_eq!(expand(&unit_secret()).unwrap().as_slice(), okm.as_slice());
    }

    #[test]
    fn split_is_at_cipher_key_len() {
        let okm = hex::decode(UNIT_SECRET_OKM_HEX).unwrap();
        let keys = derive_keys(&unit_secret()).unwrap();
        assert_eq!(keys.cipher_key().as_slice(), &okm[..32]);
        assert_eq!(keys.mac_key().as_slice(), &okm[32..48]);
    }

    #[test]
    fn output_length_is_fixed_for_any_secret() {
        for secret in [vec![0u8; 32], vec![0xffu8; 32], hex::decode(SHARED_SECRET_HEX).unwrap()] {
            let okm = expand(&secret).unwrap();
            assert_eq!(okm.len(), DERIVED_LEN);
        }
    }

    #[test]
    fn different_secrets_give_different_keys() {
        let a = derive_keys(&[1u8; 32]).unwrap();
        let b = derive_keys(&[2u8; 32]).unwrap();
        assert_ne!(a.cipher_key(), b.cipher_key());
        assert_ne!(a.mac_key(), b.mac_key());
    }

    #[test]
    fn debug_is_redacted() {
        let keys = derive_keys(&unit_secret()).unwrap();
        assert_eq!(format!("{keys:?}"), "DerivedKeys([REDACTED])");
    }
}

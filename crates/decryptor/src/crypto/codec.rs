//! Base64 encoding of envelope fields.
//!
//! Standard alphabet. Padding is optional on decode because some senders
//! strip it; surrounding whitespace is ignored.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

use super::error::DecryptError;

const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a base64 envelope field. `field` names it in the error.
pub fn decode(encoded: &str, field: &'static str) -> Result<Vec<u8>, DecryptError> {
    ENGINE
        .decode(encoded.trim())
        .map_err(|_| DecryptError::Decode(field))
}

/// Encode bytes as padded standard base64.
pub fn encode(bytes: &[u8]) -> String {
    ENGINE.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_padded_and_unpadded() {
        assert_eq!(decode("aGk=", "tag").unwrap(), b"hi");
        assert_eq!(decode("aGk", "tag").unwrap(), b"hi");
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        assert_eq!(decode("  aGk=\n", "tag").unwrap(), b"hi");
    }

    #[test]
    fn rejects_malformed_input() {
        let err = decode("not*base64", "encryptedMessage").unwrap_err();
        assert!(matches!(err, DecryptError::Decode("encryptedMessage")));
    }

    #[test]
    fn encode_is_padded() {
        assert_eq!(encode(b"hi"), "aGk=");
    }
}

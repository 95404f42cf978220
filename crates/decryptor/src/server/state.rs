//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::Decryptor;
use crate::reuse::EphemeralKeyTracker;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-wrapped or already `Arc`-backed) so
/// that Axum can clone the state for each request without copying the key.
#[derive(Clone)]
pub struct AppState {
    /// Decryptor holding the receiver's private key. Read-only.
    pub decryptor: Arc<Decryptor>,
    /// Recently seen ephemeral public keys.
    pub ephemeral_keys: EphemeralKeyTracker,
    /// Withhold plaintext when a sender reuses an ephemeral key.
    pub reject_reused_ephemeral_keys: bool,
}

impl AppState {
    /// Create a new [`AppState`].
    pub fn new(
        decryptor: Decryptor,
        ephemeral_keys: EphemeralKeyTracker,
        reject_reused_ephemeral_keys: bool,
    ) -> Self {
        Self {
            decryptor: Arc::new(decryptor),
            ephemeral_keys,
            reject_reused_ephemeral_keys,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state(reject_reused_ephemeral_keys: bool) -> AppState {
    use crate::crypto::fixtures::RECEIVER_SEC1_PEM;
    use crate::crypto::ReceiverKey;

    let key = ReceiverKey::from_pem(RECEIVER_SEC1_PEM).expect("fixture key parses");
    AppState::new(
        Decryptor::for_receiver(key),
        EphemeralKeyTracker::new(16),
        reject_reused_ephemeral_keys,
    )
}

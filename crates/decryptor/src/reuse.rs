//! Detection of ephemeral public keys that senders reuse across envelopes.
//!
//! With the fixed zero CTR IV, two envelopes under the same ephemeral key
//! share a keystream. Senders are required never to do this; this tracker
//! notices when one does. It only remembers the most recent `capacity`
//! fingerprints, so it catches bursts of reuse, not reuse months apart.
//!
//! Keys are fingerprinted by their parsed point, so the same key sent in
//! compressed form, uncompressed form or with different PEM wrapping is one
//! key.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::PublicKey;
use sha2::{Digest, Sha256};

/// SHA-256 of an ephemeral key's uncompressed SEC1 point.
pub type Fingerprint = [u8; 32];

/// Whether an ephemeral key was seen before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sighting {
    First,
    Repeat,
}

#[derive(Debug, Default)]
struct Seen {
    set: HashSet<Fingerprint>,
    order: VecDeque<Fingerprint>,
}

/// Bounded FIFO set of ephemeral key fingerprints.
///
/// Cheap to clone; clones share the same set.
#[derive(Clone, Debug)]
pub struct EphemeralKeyTracker {
    inner: Arc<Mutex<Seen>>,
    capacity: usize,
}

impl EphemeralKeyTracker {
    /// Create a tracker remembering at most `capacity` keys (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Seen::default())),
            capacity: capacity.max(1),
        }
    }

    /// Record `ephemeral_key` and report whether it was already present.
    pub fn record(&self, ephemeral_key: &PublicKey) -> Sighting {
        let fp = fingerprint(ephemeral_key);
        let mut seen = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        if seen.set.contains(&fp) {
            return Sighting::Repeat;
        }
        if seen.order.len() == self.capacity {
            if let Some(oldest) = seen.order.pop_front() {
                seen.set.remove(&oldest);
            }
        }
        seen.set.insert(fp);
        seen.order.push_back(fp);
        Sighting::First
    }

    /// Number of fingerprints currently remembered.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }
}

/// Fingerprint a key by its canonical uncompressed encoding.
pub fn fingerprint(key: &PublicKey) -> Fingerprint {
    Sha256::digest(key.to_encoded_point(false).as_bytes()).into()
}

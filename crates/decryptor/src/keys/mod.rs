//! Receiver key loading.
//!
//! # Lifecycle
//!
//! 1. At startup, [`load`] resolves the configured [`KeySource`] to PEM text:
//!    inline from the environment, from a file, or from AWS Secrets Manager.
//! 2. The PEM is parsed into a [`ReceiverKey`] and the text is zeroed.
//! 3. The key is handed to the [`crate::crypto::Decryptor`] and never replaced
//!    for the lifetime of the process.
//!
//! # Security invariants
//!
//! - The private key is **never** written to disk, logged, or included in traces.
//! - Only the source kind (never the PEM) appears in log fields.

use std::path::PathBuf;

use anyhow::{Context, Result};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use tracing::info;
use zeroize::Zeroizing;

use crate::aws::AwsClients;
use crate::crypto::{codec, ReceiverKey};

/// Where the receiver private key comes from.
#[derive(Clone)]
pub enum KeySource {
    /// PEM text supplied directly (e.g. `PRIVATE_KEY_PEM`).
    Inline(String),
    /// Path to a PEM file mounted into the container.
    File(PathBuf),
    /// Secrets Manager secret id or ARN whose `SecretString` is the PEM.
    SecretsManager(String),
}

impl KeySource {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            KeySource::Inline(_) => "inline",
            KeySource::File(_) => "file",
            KeySource::SecretsManager(_) => "secrets_manager",
        }
    }
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::Inline(_) => f.write_str("Inline([REDACTED])"),
            KeySource::File(path) => f.debug_tuple("File").field(path).finish(),
            KeySource::SecretsManager(id) => f.debug_tuple("SecretsManager").field(id).finish(),
        }
    }
}

/// Resolve `source` and parse the receiver key.
///
/// # Errors
///
/// Returns an error if the source cannot be read or does not hold a P-256
/// private key.
pub async fn load(source: &KeySource) -> Result<ReceiverKey> {
    let pem = match source {
        KeySource::Inline(pem) => Zeroizing::new(pem.clone()),
        KeySource::File(path) => Zeroizing::new(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read receiver key from {}", path.display()))?,
        ),
        KeySource::SecretsManager(secret_id) => {
            let aws = AwsClients::init().await?;
            fetch_secret_pem(&aws, secret_id).await?
        }
    };

    let key = ReceiverKey::from_pem(&pem).context("failed to parse receiver key")?;
    // Public half only, SEC1 compressed.
    let public_key = codec::encode(key.public_key().to_encoded_point(true).as_bytes());
    info!(source = source.kind(), %public_key, "receiver key loaded");
    Ok(key)
}

/// Fetch the PEM text stored in a Secrets Manager secret.
async fn fetch_secret_pem(aws: &AwsClients, secret_id: &str) -> Result<Zeroizing<String>> {
    let secret = aws
        .secretsmanager
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .context("failed to fetch receiver key from Secrets Manager")?;

    let pem = secret
        .secret_string()
        .context("receiver key secret must be stored as a string in Secrets Manager")?;
    Ok(Zeroizing::new(pem.to_owned()))
}

//! Configuration loading and validation for the decryptor service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::keys::KeySource;

/// Validated decryptor service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Inline PEM-encoded receiver private key.
    #[serde(default)]
    pub private_key_pem: Option<String>,

    /// Filesystem path to the PEM-encoded receiver private key.
    #[serde(default)]
    pub private_key_path: Option<String>,

    /// Secrets Manager id whose `SecretString` is the PEM-encoded receiver key.
    #[serde(default)]
    pub private_key_secret_id: Option<String>,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Optional OTLP endpoint. Spans are only exported when set.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of ephemeral key fingerprints remembered for reuse detection.
    #[serde(default = "default_ephemeral_key_cache_size")]
    pub ephemeral_key_cache_size: usize,

    /// Refuse envelopes whose ephemeral key was already seen.
    #[serde(default)]
    pub reject_reused_ephemeral_keys: bool,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}
fn default_ephemeral_key_cache_size() -> usize {
    10_000
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or the combination is invalid.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The single configured receiver key source.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one key variable is set and non-empty.
    pub fn key_source(&self) -> Result<KeySource> {
        let mut sources = Vec::new();
        if let Some(pem) = non_empty(&self.private_key_pem) {
            sources.push(KeySource::Inline(pem.to_owned()));
        }
        if let Some(path) = non_empty(&self.private_key_path) {
            sources.push(KeySource::File(path.into()));
        }
        if let Some(id) = non_empty(&self.private_key_secret_id) {
            sources.push(KeySource::SecretsManager(id.to_owned()));
        }

        match sources.len() {
            1 => Ok(sources.remove(0)),
            0 => anyhow::bail!(
                "one of PRIVATE_KEY_PEM, PRIVATE_KEY_PATH or PRIVATE_KEY_SECRET_ID is required"
            ),
            _ => anyhow::bail!(
                "only one of PRIVATE_KEY_PEM, PRIVATE_KEY_PATH or PRIVATE_KEY_SECRET_ID may be set"
            ),
        }
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        self.key_source()?;
        if self.ephemeral_key_cache_size == 0 {
            anyhow::bail!("EPHEMERAL_KEY_CACHE_SIZE must be > 0");
        }
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            if endpoint.trim().is_empty() {
                anyhow::bail!("OTEL_EXPORTER_OTLP_ENDPOINT must not be empty when set");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "private_key_pem",
                &self.private_key_pem.as_ref().map(|_| "[REDACTED]"),
            )
            .field("private_key_path", &self.private_key_path)
            .field("private_key_secret_id", &self.private_key_secret_id)
            .field("listen_port", &self.listen_port)
            .field("otel_exporter_otlp_endpoint", &self.otel_exporter_otlp_endpoint)
            .field("log_level", &self.log_level)
            .field("ephemeral_key_cache_size", &self.ephemeral_key_cache_size)
            .field("reject_reused_ephemeral_keys", &self.reject_reused_ephemeral_keys)
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

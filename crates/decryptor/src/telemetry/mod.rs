//! Structured logging and optional OpenTelemetry trace export.
//!
//! # Telemetry invariants
//!
//! - **No key material, tags, ciphertext or plaintext** may appear in any span
//!   attribute or log field. Failures are logged by [`ErrorKind`] label only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`).
//!
//! [`ErrorKind`]: crate::crypto::error::ErrorKind

pub mod init;

pub use init::init_telemetry;

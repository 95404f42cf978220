//! `card-decryptor` — service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise logging and optional OTLP trace export.
//! 3. Load the receiver private key from its configured source.
//! 4. Build the Axum router around a [`Decryptor`] and start serving.

mod aws;
mod config;
mod crypto;
mod keys;
mod reuse;
mod server;
mod telemetry;

use anyhow::Result;
use tracing::info;

use config::Config;
use crypto::Decryptor;
use reuse::EphemeralKeyTracker;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        reject_reused_ephemeral_keys = cfg.reject_reused_ephemeral_keys,
        "card-decryptor starting"
    );

    // -----------------------------------------------------------------------
    // 3. Receiver key
    // -----------------------------------------------------------------------
    let receiver = keys::load(&cfg.key_source()?).await?;

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(
        Decryptor::for_receiver(receiver),
        EphemeralKeyTracker::new(cfg.ephemeral_key_cache_size),
        cfg.reject_reused_ephemeral_keys,
    );
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Translate pipeline errors into HTTP responses and log their kind.
//!
//! TLS is terminated in front of this service.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

//! Common types, protocol definitions, and errors shared across `card-decryptor` crates.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
pub use protocol::EncryptedPayload;

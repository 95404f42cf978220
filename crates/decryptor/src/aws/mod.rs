//! AWS SDK client initialisation.
//!
//! Only Secrets Manager is used, and only once at startup to fetch the
//! receiver key when `PRIVATE_KEY_SECRET_ID` is configured.

pub mod clients;

pub use clients::AwsClients;

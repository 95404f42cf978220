//! AWS SDK client bundle.

use anyhow::Result;
use aws_config::BehaviorVersion;

/// AWS SDK clients used by the decryptor.
#[derive(Clone)]
pub struct AwsClients {
    /// Secrets Manager client used to fetch the receiver key.
    pub secretsmanager: aws_sdk_secretsmanager::Client,
}

impl AwsClients {
    /// Initialise the SDK clients.
    ///
    /// Credentials and region are resolved via the standard AWS provider
    /// chain (environment, profile, web identity, instance metadata).
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK config cannot be loaded.
    pub async fn init() -> Result<Self> {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let secretsmanager = aws_sdk_secretsmanager::Client::new(&config);
        Ok(Self { secretsmanager })
    }
}

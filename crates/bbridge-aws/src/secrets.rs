//! Secrets Manager adapter implementing [`SecretStorePort`].

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_secretsmanager::Client;
use bbridge_core::ports::{SecretError, SecretStorePort};
use tracing::debug;

use crate::error::secret_error;

#[derive(Debug, Clone)]
pub struct SecretsManagerStore {
    client: Client,
}

impl SecretsManagerStore {
    pub fn new(sdk: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk),
        }
    }
}

#[async_trait]
impl SecretStorePort for SecretsManagerStore {
    async fn secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        debug!(secret_id, "GetSecretValue");

        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| secret_error(&e))?;

        output
            .secret_string
            .filter(|value| !value.is_empty())
            .ok_or_else(|| SecretError::Empty(secret_id.to_string()))
    }
}

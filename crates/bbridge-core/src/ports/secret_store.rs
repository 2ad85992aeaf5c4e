//! Secret store port used by API key verification.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecretError {
    /// No secret id was configured.
    #[error("{0}")]
    NotConfigured(String),

    /// The store could not be reached or denied access.
    #[error("Failed to fetch secret: {0}")]
    Fetch(String),

    /// The secret exists but has no string value.
    #[error("Secret has no string value: {0}")]
    Empty(String),
}

/// Port for reading a secret string by id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretStorePort: Send + Sync {
    async fn secret_string(&self, secret_id: &str) -> Result<String, SecretError>;
}

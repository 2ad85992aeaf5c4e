//! Bearer API key verification.

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::GatewayError;
use crate::ports::{SecretError, SecretStorePort};

const BEARER_PREFIX: &str = "Bearer ";

/// Where the expected key comes from.
enum KeySource {
    Disabled,
    Static(String),
    Secret {
        store: Arc<dyn SecretStorePort>,
        secret_id: String,
        /// Filled on first successful fetch. A failed fetch leaves it empty.
        cached: OnceCell<String>,
    },
}

/// Checks `Authorization: Bearer <key>` headers against the configured key.
pub struct ApiKeyVerifier {
    source: KeySource,
}

impl fmt::Debug for ApiKeyVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match &self.source {
            KeySource::Disabled => "disabled",
            KeySource::Static(_) => "static",
            KeySource::Secret { .. } => "secret",
        };
        f.debug_struct("ApiKeyVerifier").field("mode", &mode).finish()
    }
}

impl ApiKeyVerifier {
    /// Accept every request.
    pub const fn disabled() -> Self {
        Self {
            source: KeySource::Disabled,
        }
    }

    pub fn with_static_key(key: impl Into<String>) -> Self {
        Self {
            source: KeySource::Static(key.into()),
        }
    }

    /// Fetch the key from `store` on first use and keep it for the process lifetime.
    pub fn with_secret(store: Arc<dyn SecretStorePort>, secret_id: impl Into<String>) -> Self {
        Self {
            source: KeySource::Secret {
                store,
                secret_id: secret_id.into(),
                cached: OnceCell::new(),
            },
        }
    }

    pub const fn is_enabled(&self) -> bool {
        !matches!(self.source, KeySource::Disabled)
    }

    /// Verify an `Authorization` header value.
    pub async fn verify(&self, authorization: Option<&str>) -> Result<(), GatewayError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let presented = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or_else(|| GatewayError::Auth("Missing or invalid authorization header".into()))?;

        let expected = self.expected_key().await?;
        if presented != expected {
            return Err(GatewayError::Auth("Invalid API key".into()));
        }
        Ok(())
    }

    async fn expected_key(&self) -> Result<&str, GatewayError> {
        match &self.source {
            KeySource::Disabled => Err(GatewayError::Configuration(
                "Authentication is disabled".into(),
            )),
            KeySource::Static(key) => Ok(key.as_str()),
            KeySource::Secret {
                store,
                secret_id,
                cached,
            } => {
                let key = cached
                    .get_or_try_init(|| async {
                        if secret_id.is_empty() {
                            return Err(SecretError::NotConfigured(
                                "API key secret id is not configured".into(),
                            ));
                        }
                        debug!(secret_id = %secret_id, "fetching API key secret");
                        let key = store.secret_string(secret_id).await?;
                        info!("API key secret loaded");
                        Ok(key)
                    })
                    .await?;
                Ok(key.as_str())
            }
        }
    }
}

//! AWS client configuration.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

use crate::catalog::BedrockCatalog;
use crate::runtime::BedrockInvoker;
use crate::secrets::SecretsManagerStore;

/// Configuration for the AWS clients.
///
/// Credentials always come from the default provider chain (environment,
/// profile, container or instance role).
///
/// # Example
///
/// ```no_run
/// # async fn run() {
/// use bbridge_aws::AwsClientConfig;
///
/// let aws = AwsClientConfig::new().with_region("eu-west-1").connect().await;
/// println!("region: {:?}", aws.region);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AwsClientConfig {
    pub(crate) region: Option<String>,
}

impl AwsClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the region resolved by the default provider chain.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_optional_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    /// Resolve the shared SDK configuration.
    pub async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        loader.load().await
    }

    /// Resolve the SDK configuration and build every adapter from it.
    pub async fn connect(&self) -> AwsAdapters {
        let sdk = self.load().await;
        let region = resolved_region(&sdk);
        debug!(region = ?region, "AWS configuration loaded");

        AwsAdapters {
            invoker: BedrockInvoker::new(&sdk),
            catalog: BedrockCatalog::new(&sdk),
            secrets: SecretsManagerStore::new(&sdk),
            region,
        }
    }
}

/// All port implementations sharing one SDK configuration.
#[derive(Debug, Clone)]
pub struct AwsAdapters {
    pub invoker: BedrockInvoker,
    pub catalog: BedrockCatalog,
    pub secrets: SecretsManagerStore,
    /// Region the SDK resolved, if any.
    pub region: Option<String>,
}

/// Region the SDK ended up with, if any.
pub fn resolved_region(sdk: &SdkConfig) -> Option<String> {
    sdk.region().map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_region_wins() {
        let sdk = AwsClientConfig::new().with_region("ap-southeast-2").load().await;
        assert_eq!(resolved_region(&sdk).as_deref(), Some("ap-southeast-2"));
    }

    #[tokio::test]
    async fn adapters_share_the_region() {
        let aws = AwsClientConfig::new()
            .with_optional_region(Some("eu-west-1".to_string()))
            .connect()
            .await;
        assert_eq!(aws.region.as_deref(), Some("eu-west-1"));
    }
}

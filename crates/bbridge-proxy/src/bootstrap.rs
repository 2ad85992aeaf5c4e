//! Composition root.
//!
//! The only place that knows about both the AWS adapters and the core
//! services.

use std::sync::Arc;

use bbridge_aws::{AwsAdapters, AwsClientConfig, SecretsManagerStore};
use bbridge_core::{
    ApiKeyVerifier, GatewayService, GatewaySettings, ModelResolver, validate_settings,
};
use tracing::{info, warn};

use crate::state::AppState;

/// Load `.env` from the working directory, if present.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Build the application state from validated settings.
pub async fn bootstrap(settings: &GatewaySettings) -> anyhow::Result<AppState> {
    validate_settings(settings)?;

    let aws = AwsClientConfig::new()
        .with_optional_region(settings.region.clone())
        .connect()
        .await;

    Ok(compose(settings, aws))
}

fn compose(settings: &GatewaySettings, aws: AwsAdapters) -> AppState {
    let region = settings.effective_region(aws.region.as_deref());

    let resolver = ModelResolver::new(
        settings.default_model_id.clone(),
        settings.default_embedding_model.clone(),
        region,
    );
    info!(
        region = resolver.region(),
        default_model = resolver.default_model_id(),
        debug = settings.debug,
        "Gateway configured"
    );

    let gateway = GatewayService::new(Arc::new(aws.invoker), Arc::new(aws.catalog), resolver)
        .with_debug(settings.debug);

    AppState::new(gateway, api_key_verifier(settings, aws.secrets))
}

/// `IS_TEST` disables auth, a static `API_KEY` beats the secret ARN.
fn api_key_verifier(settings: &GatewaySettings, secrets: SecretsManagerStore) -> ApiKeyVerifier {
    if settings.auth_disabled {
        warn!("Authentication is disabled");
        return ApiKeyVerifier::disabled();
    }

    if let Some(key) = &settings.api_key {
        info!("Using static API key");
        return ApiKeyVerifier::with_static_key(key.clone());
    }

    let secret_id = settings.api_key_secret_arn.clone().unwrap_or_default();
    info!(secret_id = %secret_id, "Using API key from Secrets Manager");
    ApiKeyVerifier::with_secret(Arc::new(secrets), secret_id)
}

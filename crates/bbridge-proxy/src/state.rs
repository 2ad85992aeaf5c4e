//! Shared application state.

use std::sync::Arc;

use bbridge_core::{ApiKeyVerifier, GatewayService};

/// Cloned into every handler; all fields are shared and immutable.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayService>,
    pub verifier: Arc<ApiKeyVerifier>,
}

impl AppState {
    pub fn new(gateway: GatewayService, verifier: ApiKeyVerifier) -> Self {
        Self {
            gateway: Arc::new(gateway),
            verifier: Arc::new(verifier),
        }
    }
}

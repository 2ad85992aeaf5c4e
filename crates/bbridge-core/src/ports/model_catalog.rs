//! Model catalog port for listing backend models.
//!
//! Provides the foundation models and inference profiles visible to the
//! gateway's credentials. Mapping to the OpenAI listing format is done by
//! [`crate::services::ModelResolver`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::FoundationModel;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to query the catalog.
    #[error("Failed to list models: {0}")]
    QueryFailed(String),
}

/// Port for querying the backend model catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelCatalogPort: Send + Sync {
    /// List on-demand foundation models with text output.
    async fn list_foundation_models(&self) -> Result<Vec<FoundationModel>, CatalogError>;

    /// List the ids of the inference profiles available in the current region.
    async fn list_inference_profiles(&self) -> Result<Vec<String>, CatalogError>;
}

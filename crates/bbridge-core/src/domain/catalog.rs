//! Model catalog types.
//!
//! [`FoundationModel`] is the backend-side domain type returned by the
//! catalog port. [`ModelCatalogEntry`] is the OpenAI-compatible listing
//! entry the proxy returns from `/api/v1/models`.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a foundation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLifecycle {
    Active,
    Legacy,
    Unknown,
}

impl ModelLifecycle {
    /// Only active and legacy models can be invoked.
    pub const fn is_invocable(self) -> bool {
        matches!(self, Self::Active | Self::Legacy)
    }
}

/// Domain summary of a backend foundation model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundationModel {
    pub id: String,
    /// Lowercase input modality names, e.g. `text`, `image`.
    pub input_modalities: Vec<String>,
    pub streaming_supported: bool,
    pub lifecycle: ModelLifecycle,
}

/// One entry of the models listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalogEntry {
    pub id: String,
    pub created: i64,
    pub object: String,
    pub owned_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<String>>,
}

impl ModelCatalogEntry {
    pub fn new(id: impl Into<String>, created: i64, modalities: Option<Vec<String>>) -> Self {
        Self {
            id: id.into(),
            created,
            object: "model".to_string(),
            owned_by: "bedrock".to_string(),
            modalities,
        }
    }
}

/// Response of `GET /api/v1/models`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelCatalogEntry>,
}

impl ModelList {
    pub fn new(data: Vec<ModelCatalogEntry>) -> Self {
        Self {
            object: "list".to_string(),
            data,
        }
    }
}

//! Model id resolution and catalog listing.
//!
//! Clients written against OpenAI send model names such as `gpt-4o` or
//! `text-embedding-3-small`. Those are substituted with the configured
//! Bedrock defaults; every other id is passed through unchanged.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::domain::{FoundationModel, ModelCatalogEntry, ModelList, unix_now};
use crate::error::GatewayError;
use crate::ports::ModelCatalogPort;

/// Chat model prefix of a foreign vendor.
const FOREIGN_CHAT_PREFIX: &str = "gpt-";

/// Embedding model prefix of a foreign vendor.
const FOREIGN_EMBEDDING_PREFIX: &str = "text-embedding-";

/// Maps client model ids to backend model ids.
#[derive(Debug, Clone)]
pub struct ModelResolver {
    default_model_id: String,
    default_embedding_model: String,
    region: String,
}

impl ModelResolver {
    pub fn new(
        default_model_id: impl Into<String>,
        default_embedding_model: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            default_model_id: default_model_id.into(),
            default_embedding_model: default_embedding_model.into(),
            region: region.into(),
        }
    }

    pub fn default_model_id(&self) -> &str {
        &self.default_model_id
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Resolve the backend id for a chat request.
    ///
    /// Absent/empty ids and `gpt-*` ids (any case) map to the default model.
    pub fn resolve_chat_model(&self, requested: Option<&str>) -> String {
        match requested {
            None | Some("") => self.default_model_id.clone(),
            Some(model) if has_prefix_ignore_case(model, FOREIGN_CHAT_PREFIX) => {
                debug!(requested = model, resolved = %self.default_model_id, "substituting default model");
                self.default_model_id.clone()
            }
            Some(model) => model.to_string(),
        }
    }

    /// Resolve the backend id for an embeddings request.
    pub fn resolve_embedding_model(&self, requested: &str) -> String {
        if requested.starts_with(FOREIGN_EMBEDDING_PREFIX) {
            debug!(requested, resolved = %self.default_embedding_model, "substituting default embedding model");
            self.default_embedding_model.clone()
        } else {
            requested.to_string()
        }
    }

    /// Build the models listing from the backend catalog.
    ///
    /// Keeps invocable, streaming-capable models, adds the cross-region
    /// inference profile of each model when the backend offers one, and
    /// falls back to the default model when nothing survives the filter.
    pub async fn list_models(
        &self,
        catalog: &dyn ModelCatalogPort,
    ) -> Result<ModelList, GatewayError> {
        let models = catalog.list_foundation_models().await?;

        let profiles: HashSet<String> = match catalog.list_inference_profiles().await {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                warn!(error = %e, "Failed to list inference profiles, continuing without them");
                HashSet::new()
            }
        };

        Ok(ModelList::new(self.catalog_entries(&models, &profiles)))
    }

    fn catalog_entries(
        &self,
        models: &[FoundationModel],
        profiles: &HashSet<String>,
    ) -> Vec<ModelCatalogEntry> {
        let created = unix_now();
        let prefix = region_prefix(&self.region);
        let mut entries = Vec::new();

        for model in models
            .iter()
            .filter(|m| m.lifecycle.is_invocable() && m.streaming_supported)
        {
            let modalities = (!model.input_modalities.is_empty())
                .then(|| model.input_modalities.clone());

            entries.push(ModelCatalogEntry::new(
                model.id.clone(),
                created,
                modalities.clone(),
            ));

            let profile_id = format!("{prefix}.{}", model.id);
            if profiles.contains(&profile_id) {
                entries.push(ModelCatalogEntry::new(profile_id, created, modalities));
            }
        }

        if entries.is_empty() {
            debug!(default = %self.default_model_id, "catalog empty after filtering, listing default model");
            entries.push(ModelCatalogEntry::new(
                self.default_model_id.clone(),
                created,
                None,
            ));
        }

        entries
    }
}

/// Inference-profile prefix for a region: `apac` for Asia-Pacific regions,
/// otherwise the first two characters (`us-east-1` → `us`).
pub fn region_prefix(region: &str) -> String {
    if region.starts_with("ap-") {
        "apac".to_string()
    } else {
        region.chars().take(2).collect()
    }
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelLifecycle;
    use crate::ports::{CatalogError, MockModelCatalogPort};

    const DEFAULT: &str = "us.anthropic.claude-3-7-sonnet-20250219-v1:0";

    fn resolver(region: &str) -> ModelResolver {
        ModelResolver::new(DEFAULT, "cohere.embed-multilingual-v3", region)
    }

    fn model(id: &str, streaming: bool, lifecycle: ModelLifecycle) -> FoundationModel {
        FoundationModel {
            id: id.to_string(),
            input_modalities: vec!["text".to_string()],
            streaming_supported: streaming,
            lifecycle,
        }
    }

    #[test]
    fn foreign_chat_models_use_default() {
        let r = resolver("us-east-1");
        assert_eq!(r.resolve_chat_model(Some("gpt-4o")), DEFAULT);
        assert_eq!(r.resolve_chat_model(Some("GPT-3.5-turbo")), DEFAULT);
        assert_eq!(r.resolve_chat_model(None), DEFAULT);
        assert_eq!(r.resolve_chat_model(Some("")), DEFAULT);
    }

    #[test]
    fn native_chat_models_pass_through() {
        let r = resolver("us-east-1");
        assert_eq!(
            r.resolve_chat_model(Some("anthropic.claude-3-haiku-20240307-v1:0")),
            "anthropic.claude-3-haiku-20240307-v1:0"
        );
        // Short ids must not panic on prefix slicing.
        assert_eq!(r.resolve_chat_model(Some("gp")), "gp");
        // Ids reach the backend exactly as sent.
        assert_eq!(
            r.resolve_chat_model(Some(" anthropic.claude-v2 ")),
            " anthropic.claude-v2 "
        );
    }

    #[test]
    fn foreign_embedding_models_use_default() {
        let r = resolver("us-east-1");
        assert_eq!(
            r.resolve_embedding_model("text-embedding-3-small"),
            "cohere.embed-multilingual-v3"
        );
        assert_eq!(
            r.resolve_embedding_model("cohere.embed-english-v3"),
            "cohere.embed-english-v3"
        );
    }

    #[test]
    fn region_prefixes() {
        assert_eq!(region_prefix("us-east-1"), "us");
        assert_eq!(region_prefix("us-west-2"), "us");
        assert_eq!(region_prefix("eu-west-1"), "eu");
        assert_eq!(region_prefix("ap-northeast-1"), "apac");
        assert_eq!(region_prefix("ap-southeast-2"), "apac");
    }

    #[tokio::test]
    async fn listing_filters_and_adds_profiles() {
        let mut catalog = MockModelCatalogPort::new();
        catalog.expect_list_foundation_models().returning(|| {
            Ok(vec![
                model("anthropic.claude-3-haiku-20240307-v1:0", true, ModelLifecycle::Active),
                model("anthropic.claude-v2", true, ModelLifecycle::Legacy),
                model("meta.llama3-8b-instruct-v1:0", false, ModelLifecycle::Active),
                model("amazon.titan-text-lite-v1", true, ModelLifecycle::Unknown),
            ])
        });
        catalog.expect_list_inference_profiles().returning(|| {
            Ok(vec![
                "eu.anthropic.claude-3-haiku-20240307-v1:0".to_string(),
                "us.anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            ])
        });

        let list = resolver("eu-central-1").list_models(&catalog).await.unwrap();
        let ids: Vec<&str> = list.data.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(list.object, "list");
        assert_eq!(
            ids,
            vec![
                "anthropic.claude-3-haiku-20240307-v1:0",
                "eu.anthropic.claude-3-haiku-20240307-v1:0",
                "anthropic.claude-v2",
            ]
        );
        assert!(list.data.iter().all(|e| e.owned_by == "bedrock" && e.object == "model"));
        assert_eq!(list.data[0].modalities, Some(vec!["text".to_string()]));
    }

    #[tokio::test]
    async fn listing_falls_back_to_default() {
        let mut catalog = MockModelCatalogPort::new();
        catalog.expect_list_foundation_models().returning(|| {
            Ok(vec![model("meta.llama3-8b-instruct-v1:0", false, ModelLifecycle::Active)])
        });
        catalog
            .expect_list_inference_profiles()
            .returning(|| Err(CatalogError::QueryFailed("AccessDenied".into())));

        let list = resolver("us-east-1").list_models(&catalog).await.unwrap();

        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].id, DEFAULT);
        assert_eq!(list.data[0].modalities, None);
    }

    #[test]
    fn listing_failure_is_upstream_error() {
        let mut catalog = MockModelCatalogPort::new();
        catalog
            .expect_list_foundation_models()
            .returning(|| Err(CatalogError::QueryFailed("throttled".into())));

        let err = tokio_test::block_on(resolver("us-east-1").list_models(&catalog)).unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}

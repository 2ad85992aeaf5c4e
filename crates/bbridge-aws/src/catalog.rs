//! Bedrock control-plane adapter implementing [`ModelCatalogPort`].

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrock::Client;
use aws_sdk_bedrock::types::{
    FoundationModelLifecycleStatus, FoundationModelSummary, InferenceType, ModelModality,
};
use bbridge_core::domain::{FoundationModel, ModelLifecycle};
use bbridge_core::ports::{CatalogError, ModelCatalogPort};
use tracing::debug;

use crate::error::catalog_error;

/// Lists on-demand text models and inference profiles.
#[derive(Debug, Clone)]
pub struct BedrockCatalog {
    client: Client,
}

impl BedrockCatalog {
    pub fn new(sdk: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk),
        }
    }
}

#[async_trait]
impl ModelCatalogPort for BedrockCatalog {
    async fn list_foundation_models(&self) -> Result<Vec<FoundationModel>, CatalogError> {
        let output = self
            .client
            .list_foundation_models()
            .by_output_modality(ModelModality::Text)
            .by_inference_type(InferenceType::OnDemand)
            .send()
            .await
            .map_err(|e| catalog_error(&e))?;

        let models: Vec<FoundationModel> = output
            .model_summaries
            .unwrap_or_default()
            .iter()
            .map(to_foundation_model)
            .collect();

        debug!(count = models.len(), "listed foundation models");
        Ok(models)
    }

    async fn list_inference_profiles(&self) -> Result<Vec<String>, CatalogError> {
        let mut ids = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_inference_profiles()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| catalog_error(&e))?;

            ids.extend(
                output
                    .inference_profile_summaries
                    .unwrap_or_default()
                    .into_iter()
                    .map(|summary| summary.inference_profile_id),
            );

            match output.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        debug!(count = ids.len(), "listed inference profiles");
        Ok(ids)
    }
}

fn to_foundation_model(summary: &FoundationModelSummary) -> FoundationModel {
    FoundationModel {
        id: summary.model_id.clone(),
        input_modalities: summary
            .input_modalities
            .iter()
            .flatten()
            .map(|m| m.as_str().to_ascii_lowercase())
            .collect(),
        streaming_supported: summary.response_streaming_supported.unwrap_or(false),
        lifecycle: summary
            .model_lifecycle
            .as_ref()
            .map_or(ModelLifecycle::Unknown, |l| lifecycle(&l.status)),
    }
}

fn lifecycle(status: &FoundationModelLifecycleStatus) -> ModelLifecycle {
    match status {
        FoundationModelLifecycleStatus::Active => ModelLifecycle::Active,
        FoundationModelLifecycleStatus::Legacy => ModelLifecycle::Legacy,
        _ => ModelLifecycle::Unknown,
    }
}

//! Embedding model families.
//!
//! Families are a closed set selected through [`SUPPORTED_EMBEDDING_MODELS`].
//! Only Cohere has a handler; Titan ids are recognized but rejected.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

use crate::domain::embeddings::{CohereEmbedArgs, CohereEmbedResponse};
use crate::domain::{
    EmbeddingData, EmbeddingInput, EmbeddingUsage, EmbeddingVector, EmbeddingsRequest,
    EmbeddingsResponse, EncodingFormat,
};
use crate::error::GatewayError;
use crate::ports::ModelInvokerPort;

/// Known embedding model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingFamily {
    Cohere,
    Titan,
}

/// Canonical model name → family.
pub const SUPPORTED_EMBEDDING_MODELS: &[(&str, EmbeddingFamily)] = &[
    ("cohere.embed-multilingual-v3", EmbeddingFamily::Cohere),
    ("cohere.embed-english-v3", EmbeddingFamily::Cohere),
    ("amazon.titan-embed-text-v1", EmbeddingFamily::Titan),
    ("amazon.titan-embed-image-v1", EmbeddingFamily::Titan),
];

/// Find the family of a model id.
///
/// Tries the id as given, then with its first dot-separated segment (a
/// region prefix such as `us.`) removed.
pub fn lookup_family(model_id: &str) -> Option<EmbeddingFamily> {
    let find = |id: &str| {
        SUPPORTED_EMBEDDING_MODELS
            .iter()
            .find(|(name, _)| *name == id)
            .map(|(_, family)| *family)
    };

    find(model_id).or_else(|| {
        model_id
            .split_once('.')
            .and_then(|(_, canonical)| find(canonical))
    })
}

/// Handler for one embedding family.
#[derive(Debug, Clone, Copy)]
pub enum EmbeddingsAdapter {
    Cohere(CohereEmbeddings),
}

impl EmbeddingsAdapter {
    /// Select the handler for a resolved backend model id.
    pub fn for_model(model_id: &str) -> Result<Self, GatewayError> {
        match lookup_family(model_id) {
            Some(EmbeddingFamily::Cohere) => Ok(Self::Cohere(CohereEmbeddings)),
            Some(EmbeddingFamily::Titan) => Err(GatewayError::validation(format!(
                "No handler for model: {model_id}"
            ))),
            None => Err(GatewayError::validation(format!(
                "Unsupported embedding model: {model_id}"
            ))),
        }
    }

    pub async fn embed(
        &self,
        invoker: &dyn ModelInvokerPort,
        request: &EmbeddingsRequest,
        model_id: &str,
    ) -> Result<EmbeddingsResponse, GatewayError> {
        match self {
            Self::Cohere(cohere) => cohere.embed(invoker, request, model_id).await,
        }
    }
}

/// Cohere Embed v3 handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct CohereEmbeddings;

impl CohereEmbeddings {
    const INPUT_TYPE: &'static str = "search_document";
    const TRUNCATE: &'static str = "END";

    /// Build the native arguments. Cohere only embeds text, and a batch
    /// must hold at least one item.
    pub fn parse_args(&self, input: &EmbeddingInput) -> Result<CohereEmbedArgs, GatewayError> {
        let texts = match input {
            EmbeddingInput::Text(text) => vec![text.clone()],
            EmbeddingInput::Batch(items) if items.is_empty() => {
                return Err(GatewayError::validation(
                    "Cohere models only support string inputs",
                ));
            }
            EmbeddingInput::Batch(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => Ok(text.clone()),
                    _ => Err(GatewayError::validation(
                        "Cohere models only support string inputs",
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(CohereEmbedArgs {
            texts,
            input_type: Self::INPUT_TYPE,
            truncate: Self::TRUNCATE,
        })
    }

    pub async fn embed(
        &self,
        invoker: &dyn ModelInvokerPort,
        request: &EmbeddingsRequest,
        model_id: &str,
    ) -> Result<EmbeddingsResponse, GatewayError> {
        let args = self.parse_args(&request.input)?;
        let body = serde_json::to_vec(&args)
            .map_err(|e| GatewayError::Internal(format!("Failed to encode embedding args: {e}")))?;

        debug!(model_id, texts = args.texts.len(), "invoking embedding model");
        let raw = invoker.invoke(model_id, Bytes::from(body)).await?;

        let native: CohereEmbedResponse = serde_json::from_slice(&raw).map_err(|e| {
            GatewayError::upstream(format!("Invalid response from embedding model: {e}"))
        })?;

        let format = request.encoding_format.unwrap_or_default();
        let data = native
            .embeddings
            .into_iter()
            .enumerate()
            .map(|(index, vector)| EmbeddingData {
                object: "embedding".to_string(),
                embedding: encode_vector(vector, format),
                index,
            })
            .collect();

        let tokens = native.usage.and_then(|u| u.input_tokens).unwrap_or(0);

        Ok(EmbeddingsResponse {
            object: "list".to_string(),
            data,
            model: model_id.to_string(),
            usage: EmbeddingUsage {
                prompt_tokens: tokens,
                total_tokens: tokens,
            },
        })
    }
}

/// Float output passes the backend values through; base64 output is the
/// little-endian f32 byte image of the vector.
fn encode_vector(vector: Vec<f64>, format: EncodingFormat) -> EmbeddingVector {
    match format {
        EncodingFormat::Float => EmbeddingVector::Float(vector),
        EncodingFormat::Base64 => {
            #[allow(clippy::cast_possible_truncation)]
            let bytes: Vec<u8> = vector
                .iter()
                .flat_map(|v| (*v as f32).to_le_bytes())
                .collect();
            EmbeddingVector::Base64(STANDARD.encode(bytes))
        }
    }
}

//! OpenAI-compatible embeddings types and the Cohere native shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body of `POST /api/v1/embeddings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsRequest {
    pub input: EmbeddingInput,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<EncodingFormat>,
}

/// `input` is a single text or a batch. Batch items stay raw so that
/// per-family validation can reject non-text elements with a clear message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Text(String),
    Batch(Vec<Value>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    #[default]
    Float,
    Base64,
}

/// Response of the embeddings endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    pub object: String,
    pub data: Vec<EmbeddingData>,
    pub model: String,
    pub usage: EmbeddingUsage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingData {
    pub object: String,
    pub embedding: EmbeddingVector,
    pub index: usize,
}

/// A vector as the backend's floats, or base64 of its little-endian f32 bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingVector {
    Float(Vec<f64>),
    Base64(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    pub prompt_tokens: u64,
    pub total_tokens: u64,
}

/// Cohere `InvokeModel` arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohereEmbedArgs {
    pub texts: Vec<String>,
    pub input_type: &'static str,
    pub truncate: &'static str,
}

/// Cohere `InvokeModel` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CohereEmbedResponse {
    #[serde(default)]
    pub embeddings: Vec<Vec<f64>>,
    #[serde(default)]
    pub usage: Option<CohereUsage>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CohereUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
}

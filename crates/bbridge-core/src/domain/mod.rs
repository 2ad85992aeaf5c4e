//! Wire types.
//!
//! `chat`, `embeddings` and `catalog` hold the OpenAI-compatible shapes the
//! clients speak. `native` holds the Bedrock request/response/event shapes.
//! Translation between the two lives in [`crate::services`].

pub mod catalog;
pub mod chat;
pub mod embeddings;
pub mod native;

pub use catalog::{FoundationModel, ModelCatalogEntry, ModelLifecycle, ModelList};
pub use chat::{
    AssistantMessage, ChatChoice, ChatCompletionChunk, ChatCompletionResponse, ChatMessage,
    ChatRequest, ChunkChoice, ChunkDelta, MessageContent, Role, StopSequences, Usage,
};
pub use embeddings::{
    EmbeddingData, EmbeddingInput, EmbeddingUsage, EmbeddingVector, EmbeddingsRequest,
    EmbeddingsResponse, EncodingFormat,
};
pub use native::{
    NativeChatBody, NativeChatResponse, NativeContentBlock, NativeMessage, NativeStreamEvent,
    NativeUsage,
};

use chrono::Utc;

/// Completion id derived from the current wall clock: `chatcmpl-<epoch millis>`.
pub(crate) fn completion_id() -> String {
    format!("chatcmpl-{}", Utc::now().timestamp_millis())
}

/// Current Unix time in seconds.
pub(crate) fn unix_now() -> i64 {
    Utc::now().timestamp()
}

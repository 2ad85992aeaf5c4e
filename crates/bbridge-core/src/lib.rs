//! Core domain types, ports and translation services for bbridge.
//!
//! bbridge exposes an OpenAI-compatible chat/embeddings API and forwards it
//! to Amazon Bedrock. This crate holds everything that does not depend on a
//! concrete transport:
//!
//! - [`domain`]: client-facing (OpenAI) and native (Bedrock) wire types.
//! - [`ports`]: traits for the backend invocation client, the model catalog
//!   and the secret store.
//! - [`services`]: model resolution, request/response translation, stream
//!   re-framing, embeddings and API key verification.
//! - [`settings`]: environment-driven configuration.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod settings;

pub use domain::{
    ChatCompletionChunk, ChatCompletionResponse, ChatMessage, ChatRequest, EmbeddingsRequest,
    EmbeddingsResponse, FoundationModel, MessageContent, ModelCatalogEntry, ModelLifecycle,
    ModelList, NativeChatBody, Role, StopSequences,
};
pub use error::{ErrorBody, GatewayError};
pub use ports::{
    CatalogError, EventStream, InvokeError, ModelCatalogPort, ModelInvokerPort, SecretError,
    SecretStorePort,
};
pub use services::{ApiKeyVerifier, ChatReply, GatewayService, ModelResolver, StreamReframer};
pub use settings::{GatewaySettings, SettingsError, validate_settings};

#[cfg(test)]
use mockall as _;

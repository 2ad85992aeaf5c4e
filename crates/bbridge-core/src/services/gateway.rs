//! Endpoint-level facade over the translation services and the ports.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::stream::BoxStream;
use tracing::debug;

use super::chat_translator::{build_native_body, parse_request};
use super::embeddings::EmbeddingsAdapter;
use super::model_resolver::ModelResolver;
use super::response_translator::translate;
use super::stream_reframer::StreamReframer;
use crate::domain::{ChatCompletionResponse, EmbeddingsRequest, EmbeddingsResponse, ModelList};
use crate::error::GatewayError;
use crate::ports::{ModelCatalogPort, ModelInvokerPort};

/// Result of a chat call.
pub enum ChatReply {
    /// Buffered completion.
    Complete(ChatCompletionResponse),
    /// SSE frames, terminated by `data: [DONE]`.
    Stream(BoxStream<'static, Bytes>),
}

impl fmt::Debug for ChatReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete(response) => f.debug_tuple("Complete").field(response).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// One method per endpoint; each call owns its request data.
pub struct GatewayService {
    invoker: Arc<dyn ModelInvokerPort>,
    catalog: Arc<dyn ModelCatalogPort>,
    resolver: ModelResolver,
    debug: bool,
}

impl GatewayService {
    pub fn new(
        invoker: Arc<dyn ModelInvokerPort>,
        catalog: Arc<dyn ModelCatalogPort>,
        resolver: ModelResolver,
    ) -> Self {
        Self {
            invoker,
            catalog,
            resolver,
            debug: false,
        }
    }

    /// Log request, native and response bodies at debug level.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Handle a chat completion request body.
    ///
    /// All validation happens before the backend is called. For streaming
    /// requests the returned stream is lazy: nothing is read from the
    /// backend until it is polled.
    pub async fn chat(&self, body: &[u8]) -> Result<ChatReply, GatewayError> {
        if self.debug {
            debug!(body = %String::from_utf8_lossy(body), "chat request");
        }

        let request = parse_request(body)?;
        let native = build_native_body(&request)?;
        let model_id = self.resolver.resolve_chat_model(request.model.as_deref());
        let client_model = request.client_model(&model_id).to_string();

        let payload = serde_json::to_vec(&native)
            .map_err(|e| GatewayError::Internal(format!("Failed to encode request: {e}")))?;
        if self.debug {
            debug!(model_id = %model_id, body = %String::from_utf8_lossy(&payload), "native request");
        }

        if request.is_streaming() {
            let events = self
                .invoker
                .invoke_stream(&model_id, Bytes::from(payload))
                .await?;
            return Ok(ChatReply::Stream(
                StreamReframer::new(client_model).into_sse(events),
            ));
        }

        let raw = self.invoker.invoke(&model_id, Bytes::from(payload)).await?;
        if self.debug {
            debug!(model_id = %model_id, body = %String::from_utf8_lossy(&raw), "native response");
        }

        Ok(ChatReply::Complete(translate(&raw, &client_model)?))
    }

    /// Handle an embeddings request body.
    pub async fn embeddings(&self, body: &[u8]) -> Result<EmbeddingsResponse, GatewayError> {
        if self.debug {
            debug!(body = %String::from_utf8_lossy(body), "embeddings request");
        }

        let request: EmbeddingsRequest = serde_json::from_slice(body)
            .map_err(|e| GatewayError::validation(format!("Invalid request body: {e}")))?;

        let model_id = self.resolver.resolve_embedding_model(&request.model);
        let adapter = EmbeddingsAdapter::for_model(&model_id)?;
        adapter.embed(self.invoker.as_ref(), &request, &model_id).await
    }

    /// List the models clients may request.
    pub async fn list_models(&self) -> Result<ModelList, GatewayError> {
        self.resolver.list_models(self.catalog.as_ref()).await
    }
}

//! Model invocation port.
//!
//! Abstracts the Bedrock runtime client: a synchronous invoke returning one
//! complete JSON document, and a streaming invoke returning one JSON event
//! envelope per item.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use thiserror::Error;

/// Lazy, in-order sequence of native event payloads.
///
/// Each item is one independently parseable JSON envelope. Dropping the
/// stream releases the underlying connection.
pub type EventStream = BoxStream<'static, Result<Bytes, InvokeError>>;

/// Errors reported by the invocation client.
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The backend rejected or failed the call.
    #[error("{message}")]
    Backend {
        /// HTTP status reported by the backend, if any.
        status: Option<u16>,
        message: String,
    },

    /// The event stream broke after it was opened.
    #[error("Stream error: {0}")]
    Stream(String),
}

impl InvokeError {
    /// Backend-supplied status code, when known.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => *status,
            Self::Stream(_) => None,
        }
    }
}

/// Port for invoking a backend model.
#[async_trait]
pub trait ModelInvokerPort: Send + Sync {
    /// Invoke a model and wait for the complete response body.
    ///
    /// # Arguments
    ///
    /// * `model_id` - Backend model or inference-profile id
    /// * `body` - Native JSON request body
    async fn invoke(&self, model_id: &str, body: Bytes) -> Result<Bytes, InvokeError>;

    /// Invoke a model with a streaming response.
    ///
    /// Resolves once the backend has accepted the request; events are then
    /// pulled from the returned stream.
    async fn invoke_stream(&self, model_id: &str, body: Bytes) -> Result<EventStream, InvokeError>;
}

//! Bedrock runtime adapter implementing [`ModelInvokerPort`].

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::primitives::event_stream::EventReceiver;
use aws_sdk_bedrockruntime::types::ResponseStream;
use aws_sdk_bedrockruntime::types::error::ResponseStreamError;
use bbridge_core::ports::{EventStream, InvokeError, ModelInvokerPort};
use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, warn};

use crate::error::invoke_error;

const JSON: &str = "application/json";

/// Invokes models through `InvokeModel` and `InvokeModelWithResponseStream`.
#[derive(Debug, Clone)]
pub struct BedrockInvoker {
    client: Client,
}

impl BedrockInvoker {
    pub fn new(sdk: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk),
        }
    }
}

#[async_trait]
impl ModelInvokerPort for BedrockInvoker {
    async fn invoke(&self, model_id: &str, body: Bytes) -> Result<Bytes, InvokeError> {
        debug!(model_id, bytes = body.len(), "InvokeModel");

        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .body(Blob::new(body.to_vec()))
            .content_type(JSON)
            .accept(JSON)
            .send()
            .await
            .map_err(|e| invoke_error(&e))?;

        Ok(Bytes::from(output.body.into_inner()))
    }

    async fn invoke_stream(&self, model_id: &str, body: Bytes) -> Result<EventStream, InvokeError> {
        debug!(model_id, bytes = body.len(), "InvokeModelWithResponseStream");

        let output = self
            .client
            .invoke_model_with_response_stream()
            .model_id(model_id)
            .body(Blob::new(body.to_vec()))
            .content_type(JSON)
            .accept(JSON)
            .send()
            .await
            .map_err(|e| invoke_error(&e))?;

        Ok(payloads(output.body))
    }
}

/// Pull chunk payloads off the event receiver one at a time.
///
/// The receiver is owned by the returned stream; dropping the stream
/// closes the connection.
fn payloads(receiver: EventReceiver<ResponseStream, ResponseStreamError>) -> EventStream {
    stream::unfold(Some(receiver), |receiver| async move {
        let mut receiver = receiver?;
        loop {
            match receiver.recv().await {
                Ok(Some(ResponseStream::Chunk(part))) => {
                    let bytes = part.bytes.map(Blob::into_inner).unwrap_or_default();
                    return Some((Ok(Bytes::from(bytes)), Some(receiver)));
                }
                Ok(Some(other)) => {
                    debug!(event = ?other, "skipping unrecognized stream member");
                }
                Ok(None) => return None,
                Err(e) => {
                    let message = DisplayErrorContext(&e).to_string();
                    warn!(error = %message, "Bedrock event stream failed");
                    return Some((Err(InvokeError::Stream(message)), None));
                }
            }
        }
    })
    .boxed()
}

//! Native event stream → OpenAI SSE re-framing.
//!
//! Every native event envelope is translated on its own; no state is
//! carried between events. Frames are produced lazily as the consumer
//! polls, and the upstream stream is owned by the output stream so that a
//! client disconnect drops it without draining.

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};
use serde_json::json;
use tracing::{trace, warn};

use crate::domain::chat::ChunkDelta;
use crate::domain::native::StreamEventKind;
use crate::domain::{ChatCompletionChunk, NativeStreamEvent};
use crate::error::GatewayError;
use crate::ports::EventStream;

/// Terminal SSE frame.
pub const DONE_FRAME: &str = "data: [DONE]\n\n";

/// Translates native stream events into client chunks for one request.
#[derive(Debug, Clone)]
pub struct StreamReframer {
    model: String,
}

impl StreamReframer {
    /// `model` is the client-requested model echoed in every chunk.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Translate one native event payload.
    ///
    /// Returns `Ok(None)` for empty payloads, unknown event kinds and
    /// deltas without text. A non-empty payload that is not JSON is an
    /// upstream error.
    pub fn reframe_event(&self, payload: &[u8]) -> Result<Option<ChatCompletionChunk>, GatewayError> {
        if payload.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let event: NativeStreamEvent = serde_json::from_slice(payload)
            .map_err(|e| GatewayError::upstream(format!("Malformed stream event: {e}")))?;

        let delta = match event.event_kind() {
            StreamEventKind::ContentBlockStart => {
                Some(ChunkDelta::opening(event.text().unwrap_or_default()))
            }
            StreamEventKind::ContentBlockDelta => event.text().map(ChunkDelta::text),
            StreamEventKind::Other => {
                trace!(kind = event.kind(), "ignoring stream event");
                None
            }
        };

        Ok(delta.map(|delta| ChatCompletionChunk::new(self.model.clone(), delta)))
    }

    /// Turn an upstream event stream into SSE frames.
    ///
    /// The output always ends with [`DONE_FRAME`]. An upstream failure is
    /// reported as one error frame followed by [`DONE_FRAME`], after which
    /// upstream is no longer polled.
    pub fn into_sse(self, upstream: EventStream) -> BoxStream<'static, Bytes> {
        let state = ReframeState {
            upstream: Some(upstream),
            reframer: self,
            phase: Phase::Streaming,
        };

        stream::unfold(state, |mut st| async move {
            loop {
                match st.phase {
                    Phase::Finished => return None,
                    Phase::Closing => {
                        st.phase = Phase::Finished;
                        return Some((Bytes::from_static(DONE_FRAME.as_bytes()), st));
                    }
                    Phase::Streaming => {}
                }

                let next = match st.upstream.as_mut() {
                    Some(upstream) => upstream.next().await,
                    None => None,
                };

                match next {
                    Some(Ok(payload)) => {
                        let frame = st
                            .reframer
                            .reframe_event(&payload)
                            .and_then(|chunk| chunk.map(chunk_frame).transpose());
                        match frame {
                            Ok(Some(frame)) => return Some((frame, st)),
                            Ok(None) => {}
                            Err(e) => return Some((st.fail(&e), st)),
                        }
                    }
                    Some(Err(e)) => {
                        let err = GatewayError::from(e);
                        return Some((st.fail(&err), st));
                    }
                    None => {
                        st.upstream = None;
                        st.phase = Phase::Finished;
                        return Some((Bytes::from_static(DONE_FRAME.as_bytes()), st));
                    }
                }
            }
        })
        .boxed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Streaming,
    /// An error frame was sent; only `[DONE]` remains.
    Closing,
    Finished,
}

struct ReframeState {
    upstream: Option<EventStream>,
    reframer: StreamReframer,
    phase: Phase,
}

impl ReframeState {
    fn fail(&mut self, err: &GatewayError) -> Bytes {
        warn!(status = err.status_code(), error = %err, "Upstream stream failed");
        self.upstream = None;
        self.phase = Phase::Closing;
        error_frame(err)
    }
}

fn chunk_frame(chunk: ChatCompletionChunk) -> Result<Bytes, GatewayError> {
    let json = serde_json::to_string(&chunk)
        .map_err(|e| GatewayError::Internal(format!("Failed to encode chunk: {e}")))?;
    Ok(Bytes::from(format!("data: {json}\n\n")))
}

/// `data: {"error":{"message":..,"status":..}}` frame.
pub fn error_frame(err: &GatewayError) -> Bytes {
    let body = json!({
        "error": {
            "message": err.to_string(),
            "status": err.status_code(),
        }
    });
    Bytes::from(format!("data: {body}\n\n"))
}

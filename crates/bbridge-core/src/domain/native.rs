//! Bedrock Anthropic Messages types (`bedrock-2023-05-31`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chat::Role;

/// Schema version sent with every chat invocation.
pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Native request body for `InvokeModel` / `InvokeModelWithResponseStream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeChatBody {
    pub anthropic_version: String,
    pub messages: Vec<NativeMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    /// System prompts joined with a blank line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
}

/// A non-system message with content normalized to typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeMessage {
    pub role: Role,
    pub content: Vec<Value>,
}

/// Native non-streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct NativeChatResponse {
    #[serde(default)]
    pub content: Vec<NativeContentBlock>,
    #[serde(default)]
    pub usage: Option<NativeUsage>,
}

impl NativeChatResponse {
    /// Text of the first `text` content block.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NativeContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NativeUsage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
}

/// One decoded streaming event envelope.
///
/// Kept as raw JSON: only `type` decides how the event is handled, and the
/// shape of the remaining fields is never assumed for kinds that are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct NativeStreamEvent {
    raw: Value,
}

/// Event kinds the re-framer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEventKind {
    ContentBlockStart,
    ContentBlockDelta,
    Other,
}

impl NativeStreamEvent {
    /// The `type` field, or `""` when absent or not a string.
    pub fn kind(&self) -> &str {
        self.raw.get("type").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn event_kind(&self) -> StreamEventKind {
        match self.kind() {
            "content_block_start" => StreamEventKind::ContentBlockStart,
            "content_block_delta" | "content_block" => StreamEventKind::ContentBlockDelta,
            _ => StreamEventKind::Other,
        }
    }

    /// Text carried by the event, looked up in `delta`, then
    /// `content_block`, then the top level.
    pub fn text(&self) -> Option<&str> {
        let nested = |field: &str| {
            self.raw
                .get(field)
                .and_then(|v| v.get("text"))
                .and_then(Value::as_str)
        };

        nested("delta")
            .or_else(|| nested("content_block"))
            .or_else(|| self.raw.get("text").and_then(Value::as_str))
    }
}

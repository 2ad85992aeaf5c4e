//! Buffered (non-streaming) response translation.

use crate::domain::{ChatCompletionResponse, NativeChatResponse, Usage};
use crate::error::GatewayError;

/// Convert one complete native response into a client chat completion.
///
/// `client_model` is echoed back verbatim; the backend id is never exposed.
pub fn translate(native: &[u8], client_model: &str) -> Result<ChatCompletionResponse, GatewayError> {
    let response: NativeChatResponse = serde_json::from_slice(native)
        .map_err(|e| GatewayError::upstream(format!("Invalid response from model: {e}")))?;

    let content = response
        .first_text()
        .ok_or_else(|| GatewayError::upstream("Model response contained no text content"))?;

    let usage = response.usage.unwrap_or_default();
    let usage = Usage::new(
        usage.input_tokens.unwrap_or(0),
        usage.output_tokens.unwrap_or(0),
    );

    Ok(ChatCompletionResponse::assistant(client_model, content, usage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn translates_text_and_usage() {
        let native = br#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": "Hello there"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 30}
        }"#;

        let response = translate(native, "gpt-4o").unwrap();

        assert_eq!(response.object, "chat.completion");
        assert_eq!(response.model, "gpt-4o");
        assert!(response.id.starts_with("chatcmpl-"));
        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].index, 0);
        assert_eq!(response.choices[0].message.role, Role::Assistant);
        assert_eq!(response.choices[0].message.content, "Hello there");
        assert_eq!(response.choices[0].finish_reason, "stop");
        assert_eq!(response.usage, Usage::new(12, 30));
        assert_eq!(response.usage.total_tokens, 42);
    }

    #[test]
    fn missing_usage_counts_as_zero() {
        let response = translate(br#"{"content": [{"type": "text", "text": "ok"}]}"#, "m").unwrap();
        assert_eq!(response.usage, Usage::default());

        let response = translate(
            br#"{"content": [{"type": "text", "text": "ok"}], "usage": {"output_tokens": 5}}"#,
            "m",
        )
        .unwrap();
        assert_eq!(response.usage, Usage::new(0, 5));
    }

    #[test]
    fn no_text_is_upstream_error() {
        let err = translate(br#"{"content": []}"#, "m").unwrap_err();
        assert!(matches!(err, GatewayError::Upstream { status: 500, .. }));
    }

    #[test]
    fn invalid_json_is_upstream_error() {
        let err = translate(b"<html>", "m").unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(!err.is_client_error());
    }
}

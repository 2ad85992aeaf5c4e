//! Chat request validation and native body construction.

use serde_json::{Value, json};

use crate::domain::native::ANTHROPIC_VERSION;
use crate::domain::{
    ChatMessage, ChatRequest, MessageContent, NativeChatBody, NativeMessage, Role, StopSequences,
};
use crate::error::GatewayError;

pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_TOP_P: f64 = 1.0;

const SYSTEM_SEPARATOR: &str = "\n\n";

/// Decode a raw chat request body.
///
/// An empty body is treated as `{}`. Shape problems are reported as
/// validation errors, never as decode errors.
pub fn parse_request(body: &[u8]) -> Result<ChatRequest, GatewayError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        json!({})
    } else {
        serde_json::from_slice(body)
            .map_err(|e| GatewayError::validation(format!("Invalid JSON body: {e}")))?
    };

    let has_messages = value
        .get("messages")
        .and_then(Value::as_array)
        .is_some_and(|messages| !messages.is_empty());
    if !has_messages {
        return Err(GatewayError::validation(
            "messages is required and must be a non-empty array",
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| GatewayError::validation(format!("Invalid request body: {e}")))
}

/// Build the native Anthropic Messages body.
///
/// Every message is checked here: it needs a non-empty role and content,
/// the role must be an accepted one, and system content must be text.
pub fn build_native_body(request: &ChatRequest) -> Result<NativeChatBody, GatewayError> {
    if request.messages.is_empty() {
        return Err(GatewayError::validation(
            "messages is required and must be a non-empty array",
        ));
    }

    let mut system_prompts = Vec::new();
    let mut messages = Vec::with_capacity(request.messages.len());

    for message in &request.messages {
        let role = message_role(message)?;
        let content = message
            .content
            .as_ref()
            .ok_or_else(missing_role_or_content)?;

        if role == Role::System {
            let text = content.as_text().ok_or_else(|| {
                GatewayError::validation("System messages must have string content")
            })?;
            system_prompts.push(text);
        } else {
            messages.push(NativeMessage {
                role,
                content: native_parts(content),
            });
        }
    }

    let system = (!system_prompts.is_empty()).then(|| system_prompts.join(SYSTEM_SEPARATOR));

    Ok(NativeChatBody {
        anthropic_version: ANTHROPIC_VERSION.to_string(),
        messages,
        max_tokens: request
            .max_tokens
            .filter(|&v| v != 0)
            .unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: non_zero(request.temperature).unwrap_or(DEFAULT_TEMPERATURE),
        top_p: non_zero(request.top_p).unwrap_or(DEFAULT_TOP_P),
        system,
        stop_sequences: request.stop.clone().and_then(stop_sequences),
        tools: request.tools.clone().filter(|tools| !tools.is_empty()),
    })
}

fn message_role(message: &ChatMessage) -> Result<Role, GatewayError> {
    let role = message
        .role
        .as_deref()
        .filter(|role| !role.is_empty())
        .ok_or_else(missing_role_or_content)?;

    if message.content.as_ref().is_none_or(MessageContent::is_empty) {
        return Err(missing_role_or_content());
    }

    Role::parse(role).ok_or_else(|| GatewayError::validation("Invalid message role"))
}

fn missing_role_or_content() -> GatewayError {
    GatewayError::validation("Each message must have role and content")
}

/// Text becomes one `text` part; structured parts pass through untouched.
fn native_parts(content: &MessageContent) -> Vec<Value> {
    match content {
        MessageContent::Text(text) => vec![json!({ "type": "text", "text": text })],
        MessageContent::Parts(parts) => parts.clone(),
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Empty stop strings and empty lists are not sent.
fn stop_sequences(stop: StopSequences) -> Option<Vec<String>> {
    match stop {
        StopSequences::One(stop) if stop.is_empty() => None,
        StopSequences::Many(stops) if stops.is_empty() => None,
        other => Some(other.into_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> ChatRequest {
        parse_request(json.as_bytes()).unwrap()
    }

    fn validation_message(result: Result<impl std::fmt::Debug, GatewayError>) -> String {
        match result {
            Err(GatewayError::Validation(message)) => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn minimal_request_gets_defaults() {
        let body = build_native_body(&request(
            r#"{"model": "gpt-4o", "messages": [{"role": "user", "content": "Hello!"}]}"#,
        ))
        .unwrap();

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "anthropic_version": "bedrock-2023-05-31",
                "messages": [{"role": "user", "content": [{"type": "text", "text": "Hello!"}]}],
                "max_tokens": 2048,
                "temperature": 1.0,
                "top_p": 1.0
            })
        );
    }

    #[test]
    fn system_messages_are_joined() {
        let body = build_native_body(&request(
            r#"{"messages": [
                {"role": "system", "content": "A"},
                {"role": "user", "content": "q"},
                {"role": "system", "content": "B"}
            ]}"#,
        ))
        .unwrap();

        assert_eq!(body.system.as_deref(), Some("A\n\nB"));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, Role::User);
    }

    #[test]
    fn structured_system_content_is_rejected() {
        let result = build_native_body(&request(
            r#"{"messages": [
                {"role": "system", "content": [{"type": "text", "text": "A"}]},
                {"role": "user", "content": "q"}
            ]}"#,
        ));
        assert_eq!(
            validation_message(result),
            "System messages must have string content"
        );
    }

    #[test]
    fn structured_content_passes_through() {
        let body = build_native_body(&request(
            r#"{"messages": [{"role": "user", "content": [
                {"type": "text", "text": "what is this?"},
                {"type": "image", "source": {"type": "base64", "media_type": "image/png", "data": "AAAA"}}
            ]}]}"#,
        ))
        .unwrap();

        assert_eq!(body.messages[0].content.len(), 2);
        assert_eq!(body.messages[0].content[1]["type"], "image");
    }

    #[test]
    fn zero_sampling_values_fall_back_to_defaults() {
        let body = build_native_body(&request(
            r#"{"messages": [{"role": "user", "content": "x"}], "temperature": 0, "top_p": 0, "max_tokens": 0}"#,
        ))
        .unwrap();

        assert_eq!(body.max_tokens, DEFAULT_MAX_TOKENS);
        assert!((body.temperature - DEFAULT_TEMPERATURE).abs() < f64::EPSILON);
        assert!((body.top_p - DEFAULT_TOP_P).abs() < f64::EPSILON);
    }

    #[test]
    fn explicit_sampling_values_are_kept() {
        let body = build_native_body(&request(
            r#"{"messages": [{"role": "user", "content": "x"}], "temperature": 0.2, "top_p": 0.9, "max_tokens": 64}"#,
        ))
        .unwrap();

        assert_eq!(body.max_tokens, 64);
        assert!((body.temperature - 0.2).abs() < f64::EPSILON);
        assert!((body.top_p - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn scalar_stop_is_wrapped() {
        let body = build_native_body(&request(
            r#"{"messages": [{"role": "user", "content": "x"}], "stop": "END"}"#,
        ))
        .unwrap();
        assert_eq!(body.stop_sequences, Some(vec!["END".to_string()]));

        let body = build_native_body(&request(
            r#"{"messages": [{"role": "user", "content": "x"}], "stop": ["a", "b"]}"#,
        ))
        .unwrap();
        assert_eq!(
            body.stop_sequences,
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn empty_stop_is_omitted() {
        for raw in [
            r#"{"messages": [{"role": "user", "content": "x"}], "stop": ""}"#,
            r#"{"messages": [{"role": "user", "content": "x"}], "stop": []}"#,
        ] {
            let body = build_native_body(&request(raw)).unwrap();
            assert!(body.stop_sequences.is_none(), "body: {raw}");
            let json = serde_json::to_value(&body).unwrap();
            assert!(json.get("stop_sequences").is_none(), "body: {raw}");
        }
    }

    #[test]
    fn empty_tools_are_omitted() {
        let body = build_native_body(&request(
            r#"{"messages": [{"role": "user", "content": "x"}], "tools": []}"#,
        ))
        .unwrap();
        assert!(body.tools.is_none());

        let body = build_native_body(&request(
            r#"{"messages": [{"role": "user", "content": "x"}], "tools": [{"name": "lookup", "input_schema": {"type": "object"}}]}"#,
        ))
        .unwrap();
        assert_eq!(body.tools.unwrap()[0]["name"], "lookup");
    }

    #[test]
    fn missing_messages_are_rejected() {
        for raw in [
            "",
            "{}",
            r#"{"messages": []}"#,
            r#"{"messages": "hi"}"#,
        ] {
            assert_eq!(
                validation_message(parse_request(raw.as_bytes())),
                "messages is required and must be a non-empty array",
                "body: {raw}"
            );
        }
    }

    #[test]
    fn incomplete_messages_are_rejected() {
        for raw in [
            r#"{"messages": [{"role": "user"}]}"#,
            r#"{"messages": [{"content": "x"}]}"#,
            r#"{"messages": [{"role": "user", "content": ""}]}"#,
            r#"{"messages": [{"role": "", "content": "x"}]}"#,
        ] {
            assert_eq!(
                validation_message(build_native_body(&request(raw))),
                "Each message must have role and content",
                "body: {raw}"
            );
        }
    }

    #[test]
    fn empty_message_list_is_rejected_when_built_directly() {
        let request: ChatRequest = serde_json::from_str(r#"{"messages": []}"#).unwrap();
        assert_eq!(
            validation_message(build_native_body(&request)),
            "messages is required and must be a non-empty array"
        );
    }

    #[test]
    fn first_invalid_message_decides_the_error() {
        let result = build_native_body(&request(
            r#"{"messages": [
                {"role": "system", "content": [{"type": "text", "text": "A"}]},
                {"role": "tool", "content": "x"}
            ]}"#,
        ));
        assert_eq!(
            validation_message(result),
            "System messages must have string content"
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result = build_native_body(&request(
            r#"{"messages": [{"role": "tool", "content": "x"}]}"#,
        ));
        assert_eq!(validation_message(result), "Invalid message role");
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        let err = parse_request(b"{not json").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}

//! Wire types for the OpenAI chat-completions API format used by all providers.
//!
//! Every provider PromptDesk talks to (Ollama, OpenRouter, Gemini, Groq) exposes
//! the same `/chat/completions` shape, so one set of typed request/response
//! structs covers all of them.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Messages (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// A chat message in the OpenAI format.
///
/// Each variant maps to a `role` field value. Requests in this system carry
/// exactly one user-role message, so that is the only role the request side
/// defines; assistant content comes back through [`AssistantMessage`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "user")]
    User { content: String },
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Chat completion request
// ─────────────────────────────────────────────

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

// ─────────────────────────────────────────────
// Chat completion response
// ─────────────────────────────────────────────

/// Raw chat completion response from an OpenAI-compatible API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<ChatChoice>,
    pub usage: Option<UsageInfo>,
}

impl ChatCompletionResponse {
    /// Extract the assistant content of the first choice, if any.
    pub fn first_content(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

/// A single choice in a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

/// Token usage statistics from the LLM.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_serialization() {
        let msg = Message::user("Hello, world!");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "Hello, world!");
    }

    #[test]
    fn test_user_message_round_trip() {
        let msg = Message::user("Resume esto");
        let json_str = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json_str).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatCompletionRequest {
            model: "llama3".to_string(),
            messages: vec![Message::user("Resume esto")],
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "llama3");
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "Resume esto");
    }

    #[test]
    fn test_chat_completion_response_parsing() {
        let api_json = json!({
            "id": "chatcmpl-abc123",
            "choices": [{
                "message": { "content": "Hola, mundo." },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 4,
                "total_tokens": 14
            }
        });

        let resp: ChatCompletionResponse = serde_json::from_value(api_json).unwrap();
        assert_eq!(resp.usage.as_ref().unwrap().total_tokens, 14);
        assert_eq!(resp.first_content().as_deref(), Some("Hola, mundo."));
    }

    #[test]
    fn test_chat_completion_response_missing_usage() {
        let api_json = json!({
            "id": "chatcmpl-xyz",
            "choices": [{
                "message": { "content": "ok" },
                "finish_reason": "stop"
            }]
        });

        let resp: ChatCompletionResponse = serde_json::from_value(api_json).unwrap();
        assert!(resp.usage.is_none());
        assert_eq!(resp.first_content().as_deref(), Some("ok"));
    }

    #[test]
    fn test_chat_completion_empty_choices() {
        let api_json = json!({
            "id": "chatcmpl-empty",
            "choices": [],
            "usage": null
        });

        let resp: ChatCompletionResponse = serde_json::from_value(api_json).unwrap();
        assert!(resp.first_content().is_none());
    }

    #[test]
    fn test_null_content_deserialization() {
        let api_json = json!({
            "id": null,
            "choices": [{
                "message": { "content": null },
                "finish_reason": "stop"
            }],
            "usage": null
        });

        let resp: ChatCompletionResponse = serde_json::from_value(api_json).unwrap();
        assert!(resp.first_content().is_none());
    }
}

//! Generic HTTP client for OpenAI-compatible chat-completions APIs.
//!
//! One implementation covers every provider in the registry: Ollama,
//! OpenRouter, Gemini (OpenAI compatibility endpoint), and Groq all accept
//! `POST {base}/chat/completions` with a bearer credential.

use async_trait::async_trait;
use tracing::{debug, error};

use promptdesk_core::types::{ChatCompletionRequest, ChatCompletionResponse, Message};

use crate::error::ProviderError;
use crate::traits::CompletionBackend;

// ─────────────────────────────────────────────
// ChatClient
// ─────────────────────────────────────────────

/// A preconfigured client for one provider's OpenAI-compatible HTTP API.
pub struct ChatClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.groq.com/openai/v1"`).
    api_base: String,
    /// Credential for Bearer authentication. May be a placeholder for local
    /// providers, or empty when unconfigured — auth errors surface per call.
    api_key: String,
    /// Provider display name for logging.
    display_name: &'static str,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("api_base", &self.api_base)
            .field("provider", &self.display_name)
            .finish()
    }
}

impl ChatClient {
    /// Create a new client for one provider endpoint.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        display_name: &'static str,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        ChatClient {
            client,
            api_base: api_base.into(),
            api_key: api_key.into(),
            display_name,
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl CompletionBackend for ChatClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let request_body = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![Message::user(prompt)],
        };

        debug!(
            provider = self.display_name,
            model = %model,
            "Calling chat completions"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.display_name, error = %e, "HTTP request failed");
                ProviderError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                provider = self.display_name,
                status = %status,
                body = %body,
                "API error"
            );
            return Err(ProviderError::Api { status, body });
        }

        let chat_resp = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| {
                error!(provider = self.display_name, error = %e, "Failed to parse response");
                ProviderError::Transport(e)
            })?;

        chat_resp
            .first_content()
            .ok_or_else(|| ProviderError::Malformed("no choices in response".to_string()))
    }

    fn display_name(&self) -> &str {
        self.display_name
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // ── Unit tests ──

    #[test]
    fn test_completions_url_trailing_slash() {
        let client = ChatClient::new(
            "https://generativelanguage.googleapis.com/v1beta/openai/",
            "key",
            "Gemini",
        );
        assert_eq!(
            client.completions_url(),
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
        );
    }

    #[test]
    fn test_completions_url_no_trailing_slash() {
        let client = ChatClient::new("http://localhost:11434/v1", "ollama", "Ollama");
        assert_eq!(
            client.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_display_name() {
        let client = ChatClient::new("https://api.groq.com/openai/v1", "key", "Groq");
        assert_eq!(client.display_name(), "Groq");
    }

    // ── Integration tests with mock server ──

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-test",
                "choices": [{
                    "message": { "content": "Hola, mundo." },
                    "finish_reason": "stop"
                }],
                "usage": {
                    "prompt_tokens": 12,
                    "completion_tokens": 4,
                    "total_tokens": 16
                }
            })))
            .mount(&mock_server)
            .await;

        let client = ChatClient::new(mock_server.uri(), "test-key-123", "Groq");
        let content = client.complete("llama3", "Hello, world.").await.unwrap();

        assert_eq!(content, "Hola, mundo.");
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3",
                "messages": [{
                    "role": "user",
                    "content": "Summarize the following text briefly and clearly:\n\nhi"
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-body",
                "choices": [{
                    "message": { "content": "ok" },
                    "finish_reason": "stop"
                }],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let client = ChatClient::new(mock_server.uri(), "k", "Ollama");
        let content = client
            .complete(
                "llama3",
                "Summarize the following text briefly and clearly:\n\nhi",
            )
            .await
            .unwrap();

        // If the body matcher fails, wiremock returns 404 → we'd get an error
        assert_eq!(content, "ok");
    }

    #[tokio::test]
    async fn test_complete_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(serde_json::json!({
                    "error": {
                        "message": "Rate limit exceeded",
                        "type": "rate_limit_error"
                    }
                })),
            )
            .mount(&mock_server)
            .await;

        let client = ChatClient::new(mock_server.uri(), "k", "OpenRouter");
        let err = client.complete("gpt-4o", "Hello").await.unwrap_err();

        match err {
            ProviderError::Api { status, body } => {
                assert_eq!(status.as_u16(), 429);
                assert!(body.contains("Rate limit exceeded"));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        // Point to a port that's not listening
        let client = ChatClient::new("http://127.0.0.1:1", "k", "Ollama");
        let err = client.complete("llama3", "Hello").await.unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn test_complete_empty_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-empty",
                "choices": [],
                "usage": null
            })))
            .mount(&mock_server)
            .await;

        let client = ChatClient::new(mock_server.uri(), "k", "Gemini");
        let err = client.complete("gemini-2.5-flash", "Hello").await.unwrap_err();

        assert!(matches!(err, ProviderError::Malformed(_)));
        assert!(err.to_string().contains("no choices"));
    }
}

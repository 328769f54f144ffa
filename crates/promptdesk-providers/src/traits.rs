//! Completion backend trait — the seam between the dispatcher and HTTP.
//!
//! The only production implementation is [`crate::client::ChatClient`], which
//! covers every OpenAI-compatible API. Tests substitute scripted backends to
//! assert on the exact prompt sent and to count calls.

use async_trait::async_trait;

use crate::error::ProviderError;

/// Trait that all completion backends must implement.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one chat-completion request: a single user-role message containing
    /// `prompt`, executed against `model`.
    ///
    /// Returns the assistant message content on success. All failures
    /// (network, HTTP status, parse, missing choices) come back as
    /// [`ProviderError`] — no retries.
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Display name for logging and error messages.
    fn display_name(&self) -> &str;
}

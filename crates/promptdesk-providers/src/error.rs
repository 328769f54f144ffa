//! Provider call errors.

use reqwest::StatusCode;

/// Any failure while calling a provider's chat-completions endpoint.
///
/// The dispatcher treats these uniformly — one user-facing message embedding
/// the cause, no differentiation by subtype, no retry.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Network-level failure (connect, timeout, TLS) or body decode failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP response from the provider.
    #[error("{status} — {body}")]
    Api { status: StatusCode, body: String },

    /// Structurally valid HTTP response without usable content.
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ProviderError::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "rate limit exceeded".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("rate limit exceeded"));
    }

    #[test]
    fn test_malformed_display() {
        let err = ProviderError::Malformed("no choices in response".to_string());
        assert_eq!(err.to_string(), "malformed response: no choices in response");
    }
}

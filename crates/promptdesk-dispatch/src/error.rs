//! Dispatch error taxonomy.
//!
//! Every variant renders as a user-facing string starting with a marker; the
//! dispatcher recovers all of them at its boundary and puts the text in the
//! output field. None are fatal to the running process.

/// Errors raised during one dispatch.
///
/// The first four are early exits before any network call; `ProviderCall`
/// wraps any failure from the remote call, treated uniformly with no retry.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// File present but unreadable or not valid UTF-8.
    #[error("❌ Error reading file: {0}")]
    FileRead(String),

    /// No usable text after file/text resolution.
    #[error("⚠️ Enter some text to process.")]
    EmptyInput,

    /// Provider name not present in the registry.
    #[error("❌ Unknown provider: {0}")]
    UnknownProvider(String),

    /// Task label outside the fixed set.
    #[error("❌ Unrecognized task.")]
    UnrecognizedTask,

    /// Network, auth, invalid model, rate limit, timeout — anything from the
    /// remote call.
    #[error("❌ Error: {0}")]
    ProviderCall(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_messages_start_with_marker() {
        let errors = [
            DispatchError::FileRead("permission denied".to_string()),
            DispatchError::EmptyInput,
            DispatchError::UnknownProvider("anthropic".to_string()),
            DispatchError::UnrecognizedTask,
            DispatchError::ProviderCall("connection refused".to_string()),
        ];
        for err in errors {
            let msg = err.to_string();
            assert!(
                msg.starts_with('❌') || msg.starts_with('⚠'),
                "message {msg:?} lacks a marker"
            );
        }
    }

    #[test]
    fn test_provider_call_embeds_cause() {
        let err = DispatchError::ProviderCall("401 — invalid api key".to_string());
        assert_eq!(err.to_string(), "❌ Error: 401 — invalid api key");
    }
}

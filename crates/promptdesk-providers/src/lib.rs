//! LLM provider layer for PromptDesk.
//!
//! # Architecture
//!
//! - [`traits::CompletionBackend`] — trait every backend implements
//! - [`registry`] — static specs for the 4 supported providers + the runtime
//!   registry built once at startup
//! - [`client::ChatClient`] — generic OpenAI-compatible HTTP client
//! - [`error::ProviderError`] — transport/API/parse failures

pub mod client;
pub mod error;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use client::ChatClient;
pub use error::ProviderError;
pub use registry::{ProviderEntry, ProviderRegistry, ProviderSpec, PROVIDERS};
pub use traits::CompletionBackend;

//! Core types and utilities for PromptDesk.
//!
//! - [`types`] — OpenAI chat-completions wire types
//! - [`config`] — configuration schema, loading, env var overrides
//! - [`utils`] — word counting, rounding, path helpers

pub mod config;
pub mod types;
pub mod utils;

//! Dispatch layer for PromptDesk.
//!
//! - [`task::Task`] — the closed set of canned tasks and their prompt templates
//! - [`error::DispatchError`] — the dispatch error taxonomy
//! - [`dispatcher::Dispatcher`] — one linear request/response per user action

pub mod dispatcher;
pub mod error;
pub mod task;

// Re-export main types for convenience
pub use dispatcher::{DispatchRequest, Dispatcher, Reply, RunMetrics};
pub use error::DispatchError;
pub use task::Task;

//! The dispatcher — one linear request/response per user action.
//!
//! Given a provider name, task label, model, and input text (or a file whose
//! contents replace the text), builds the task prompt, issues one
//! chat-completion request through the registry's preconfigured client, and
//! returns the response text plus elapsed time and word counts.
//!
//! No state machine: three early-exit branches (file read, empty input,
//! unrecognized task) and one fallible region around the network call.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info, warn};

use promptdesk_core::utils::{round_secs, word_count};
use promptdesk_providers::{CompletionBackend, ProviderRegistry};

use crate::error::DispatchError;
use crate::task::Task;

// ─────────────────────────────────────────────
// Request / reply types
// ─────────────────────────────────────────────

/// One dispatch request. Lives only for the duration of the call.
#[derive(Clone, Debug)]
pub struct DispatchRequest {
    /// Provider name (internal or display form).
    pub provider: String,
    /// Task label (e.g. `"Resumen"`).
    pub task: String,
    /// Model identifier, sent verbatim to the provider.
    pub model: String,
    /// Typed input text. Replaced wholesale by `file` contents when present.
    pub input_text: String,
    /// Optional plain-text file whose contents override `input_text`.
    pub file: Option<PathBuf>,
}

impl DispatchRequest {
    pub fn new(
        provider: impl Into<String>,
        task: impl Into<String>,
        model: impl Into<String>,
        input_text: impl Into<String>,
    ) -> Self {
        DispatchRequest {
            provider: provider.into(),
            task: task.into(),
            model: model.into(),
            input_text: input_text.into(),
            file: None,
        }
    }

    /// Attach a file whose contents replace the typed text.
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Timing and word-count metrics for one successful dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunMetrics {
    /// Wall-clock seconds spent in the provider call, rounded to 2 decimals.
    pub elapsed_secs: f64,
    /// Whitespace-token count of the resolved input text.
    pub input_words: usize,
    /// Whitespace-token count of the trimmed output text.
    pub output_words: usize,
}

/// What the caller displays: output text, and metrics only on success.
#[derive(Clone, Debug)]
pub struct Reply {
    /// Assistant output on success, or the user-facing error message.
    pub output: String,
    /// Absent whenever an error path was taken.
    pub metrics: Option<RunMetrics>,
}

// ─────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────

/// Dispatches requests against the read-only provider registry.
pub struct Dispatcher {
    registry: ProviderRegistry,
}

impl Dispatcher {
    pub fn new(registry: ProviderRegistry) -> Self {
        Dispatcher { registry }
    }

    /// The registry this dispatcher selects providers from.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Process one request. Every error is recovered here and rendered as the
    /// output text, with the metric fields left empty.
    pub async fn process(&self, request: &DispatchRequest) -> Reply {
        match self.run(request).await {
            Ok((output, metrics)) => Reply {
                output,
                metrics: Some(metrics),
            },
            Err(e) => {
                warn!(provider = %request.provider, task = %request.task, error = %e, "dispatch failed");
                Reply {
                    output: e.to_string(),
                    metrics: None,
                }
            }
        }
    }

    async fn run(&self, request: &DispatchRequest) -> Result<(String, RunMetrics), DispatchError> {
        // 1. A supplied file replaces the typed text wholesale.
        let input_text = match &request.file {
            Some(path) => std::fs::read_to_string(path)
                .map_err(|e| DispatchError::FileRead(e.to_string()))?,
            None => request.input_text.clone(),
        };

        // 2. Nothing usable to send.
        if input_text.trim().is_empty() {
            return Err(DispatchError::EmptyInput);
        }

        // 3. Callers only offer known provider names, but fail politely anyway.
        let entry = self
            .registry
            .get(&request.provider)
            .ok_or_else(|| DispatchError::UnknownProvider(request.provider.clone()))?;

        // 4. Task labels form a closed set.
        let task =
            Task::from_label(&request.task).ok_or(DispatchError::UnrecognizedTask)?;

        let prompt = task.prompt(&input_text);
        debug!(
            provider = entry.spec.display_name,
            model = %request.model,
            task = task.label(),
            "dispatching prompt"
        );

        // 5. One synchronous call, timed; no retry, no partial result.
        let start = Instant::now();
        let content = entry
            .backend()
            .complete(&request.model, &prompt)
            .await
            .map_err(|e| DispatchError::ProviderCall(e.to_string()))?;
        let elapsed_secs = round_secs(start.elapsed().as_secs_f64());

        let output = content.trim().to_string();
        let metrics = RunMetrics {
            elapsed_secs,
            input_words: word_count(&input_text),
            output_words: word_count(&output),
        };

        info!(
            provider = entry.spec.display_name,
            elapsed = metrics.elapsed_secs,
            input_words = metrics.input_words,
            output_words = metrics.output_words,
            "dispatch complete"
        );

        Ok((output, metrics))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

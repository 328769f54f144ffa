//! The closed set of canned tasks and their prompt templates.
//!
//! Task labels are the identifiers callers select by; the set is fixed, so a
//! plain enum replaces any dynamic dispatch.

/// One of the fixed prompt templates applied to user-supplied text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// English → Spanish translation.
    TranslateEnEs,
    /// Brief summary.
    Summarize,
    /// Sentiment analysis with a short explanation.
    Sentiment,
}

impl Task {
    /// All tasks, in display order.
    pub const ALL: [Task; 3] = [Task::TranslateEnEs, Task::Summarize, Task::Sentiment];

    /// Parse a task from its selection label. Anything outside the fixed set
    /// is `None`.
    pub fn from_label(label: &str) -> Option<Task> {
        match label {
            "Traducción EN→ES" => Some(Task::TranslateEnEs),
            "Resumen" => Some(Task::Summarize),
            "Análisis de sentimiento" => Some(Task::Sentiment),
            _ => None,
        }
    }

    /// The selection label for this task.
    pub fn label(&self) -> &'static str {
        match self {
            Task::TranslateEnEs => "Traducción EN→ES",
            Task::Summarize => "Resumen",
            Task::Sentiment => "Análisis de sentimiento",
        }
    }

    /// Build the prompt: the fixed instruction prefix followed by the text.
    pub fn prompt(&self, text: &str) -> String {
        let instruction = match self {
            Task::TranslateEnEs => "Translate the following text from English to Spanish:",
            Task::Summarize => "Summarize the following text briefly and clearly:",
            Task::Sentiment => {
                "Analyze the sentiment of the following text. State whether it is \
                 positive, negative, or neutral, and explain briefly:"
            }
        };
        format!("{instruction}\n\n{text}")
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

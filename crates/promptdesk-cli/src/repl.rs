//! Interactive REPL — the headless stand-in for the original selector UI.
//!
//! Holds a current provider/task/model selection; plain lines are dispatched
//! as input text, `/`-commands switch the selection. Switching provider resets
//! the model to the first entry of that provider's list, mirroring the
//! selector behavior this replaces.

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use tracing::debug;

use promptdesk_core::config::schema::Defaults;
use promptdesk_dispatch::{DispatchRequest, Dispatcher, Task};
use promptdesk_providers::ProviderRegistry;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

// ─────────────────────────────────────────────
// Selection state
// ─────────────────────────────────────────────

/// The current provider/task/model selection.
struct Selection {
    provider: String,
    task: Task,
    model: String,
}

impl Selection {
    /// Initial selection from the configured defaults, falling back to the
    /// first registry entry and the first task.
    fn from_defaults(registry: &ProviderRegistry, defaults: &Defaults) -> Self {
        let provider = if registry.get(&defaults.provider).is_some() {
            defaults.provider.clone()
        } else {
            registry
                .entries()
                .first()
                .map(|e| e.spec.name.to_string())
                .unwrap_or_default()
        };
        let model = registry
            .default_model(&provider)
            .map(String::from)
            .unwrap_or_default();
        let task = Task::from_label(&defaults.task).unwrap_or(Task::TranslateEnEs);

        Selection {
            provider,
            task,
            model,
        }
    }

    /// Switch provider; the model resets to the first entry of the new
    /// provider's list.
    fn switch_provider(&mut self, registry: &ProviderRegistry, name: &str) -> Result<(), String> {
        let entry = registry
            .get(name)
            .ok_or_else(|| format!("unknown provider: {name}"))?;
        self.provider = entry.spec.name.to_string();
        self.model = entry.default_model().unwrap_or_default().to_string();
        Ok(())
    }

    /// Switch model; it must belong to the current provider's list.
    fn switch_model(&mut self, registry: &ProviderRegistry, name: &str) -> Result<(), String> {
        let models = registry
            .models(&self.provider)
            .ok_or_else(|| format!("unknown provider: {}", self.provider))?;
        if !models.iter().any(|m| m == name) {
            return Err(format!(
                "model {name} is not registered for {}",
                self.provider
            ));
        }
        self.model = name.to_string();
        Ok(())
    }

    /// Switch task by label.
    fn switch_task(&mut self, label: &str) -> Result<(), String> {
        match Task::from_label(label) {
            Some(task) => {
                self.task = task;
                Ok(())
            }
            None => Err(format!("unrecognized task: {label}")),
        }
    }
}

// ─────────────────────────────────────────────
// REPL loop
// ─────────────────────────────────────────────

/// Run the interactive REPL loop.
pub async fn run(dispatcher: Dispatcher, defaults: &Defaults) -> Result<()> {
    helpers::print_banner();

    let mut selection = Selection::from_defaults(dispatcher.registry(), defaults);
    let mut editor = create_editor()?;

    loop {
        let prompt = format!("{}:{}> ", selection.provider, selection.model);
        let input = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => break,
            Err(rustyline::error::ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        if is_exit_command(trimmed) {
            println!("\nGoodbye! 👋");
            break;
        }

        let _ = editor.add_history_entry(&input);

        if trimmed.starts_with('/') {
            handle_command(&dispatcher, &mut selection, trimmed).await;
            continue;
        }

        dispatch_text(&dispatcher, &selection, trimmed, None).await;
    }

    save_history(&mut editor);

    Ok(())
}

/// Handle a `/`-command.
async fn handle_command(dispatcher: &Dispatcher, selection: &mut Selection, line: &str) {
    let registry = dispatcher.registry();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (line, ""),
    };

    match command {
        "/provider" => match selection.switch_provider(registry, arg) {
            Ok(()) => {
                println!(
                    "Provider: {} — models: {} {}",
                    selection.provider.bold(),
                    registry
                        .models(&selection.provider)
                        .unwrap_or_default()
                        .join(", "),
                    format!("(selected: {})", selection.model).dimmed()
                );
            }
            Err(e) => eprintln!("{} {e}", "✗".red()),
        },
        "/model" => match selection.switch_model(registry, arg) {
            Ok(()) => println!("Model: {}", selection.model.bold()),
            Err(e) => eprintln!("{} {e}", "✗".red()),
        },
        "/task" => match selection.switch_task(arg) {
            Ok(()) => println!("Task: {}", selection.task.label().bold()),
            Err(e) => eprintln!("{} {e}", "✗".red()),
        },
        "/models" => {
            for model in registry.models(&selection.provider).unwrap_or_default() {
                println!("  {model}");
            }
        }
        "/tasks" => {
            for task in Task::ALL {
                println!("  {}", task.label());
            }
        }
        "/file" => {
            if arg.is_empty() {
                eprintln!("{} usage: /file PATH", "✗".red());
            } else {
                // Same plain-text restriction as the run subcommand.
                match helpers::txt_path(arg) {
                    Ok(path) => dispatch_text(dispatcher, selection, "", Some(path)).await,
                    Err(e) => eprintln!("{} {e}", "✗".red()),
                }
            }
        }
        "/help" => print_help(),
        other => eprintln!("{} unknown command: {other} (try /help)", "✗".red()),
    }
}

/// Dispatch the current selection with typed text or a validated file path.
async fn dispatch_text(
    dispatcher: &Dispatcher,
    selection: &Selection,
    text: &str,
    file: Option<std::path::PathBuf>,
) {
    debug!(
        provider = %selection.provider,
        model = %selection.model,
        task = selection.task.label(),
        "processing input"
    );

    let mut request = DispatchRequest::new(
        selection.provider.clone(),
        selection.task.label(),
        selection.model.clone(),
        text,
    );
    if let Some(path) = file {
        request = request.with_file(path);
    }

    let reply = dispatcher.process(&request).await;
    helpers::print_reply(&reply);
}

fn print_help() {
    println!("  /provider NAME   switch provider (model resets to its first entry)");
    println!("  /model NAME      switch model within the current provider");
    println!("  /task LABEL      switch task");
    println!("  /models          list the current provider's models");
    println!("  /tasks           list task labels");
    println!("  /file PATH       process a .txt file's contents");
    println!("  exit             quit");
}

// ─────────────────────────────────────────────
// Editor plumbing
// ─────────────────────────────────────────────

/// Create a rustyline editor with history.
fn create_editor() -> Result<Editor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut Editor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file.
fn history_path() -> std::path::PathBuf {
    promptdesk_core::utils::get_data_path()
        .join("history")
        .join("cli_history")
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

//! PromptDesk CLI — entry point.
//!
//! # Commands
//!
//! - `promptdesk run -p PROVIDER -t TASK [-m MODEL] [--text TEXT | --file F.txt]` — one-shot dispatch
//! - `promptdesk repl` — interactive session with switchable provider/task/model
//! - `promptdesk providers` — list providers and their models
//! - `promptdesk status` — show configuration and provider status

mod helpers;
mod repl;
mod status;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use promptdesk_core::config::load_config;
use promptdesk_dispatch::{DispatchRequest, Dispatcher};
use promptdesk_providers::ProviderRegistry;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🗂 PromptDesk — switchable LLM task runner
#[derive(Parser)]
#[command(name = "promptdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one task against a provider
    Run {
        /// Provider name (e.g. "ollama", "groq"). Defaults to the configured one.
        #[arg(short, long)]
        provider: Option<String>,

        /// Task label (e.g. "Resumen"). Defaults to the configured one.
        #[arg(short, long)]
        task: Option<String>,

        /// Model identifier. Defaults to the provider's first registered model.
        #[arg(short, long)]
        model: Option<String>,

        /// Input text to process.
        #[arg(long)]
        text: Option<String>,

        /// Plain-text file whose contents replace --text entirely.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Interactive session (switch provider/task/model between dispatches)
    Repl {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// List providers and their model lists
    Providers,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            provider,
            task,
            model,
            text,
            file,
            logs,
        } => {
            init_logging(logs);
            run_once(provider, task, model, text, file).await
        }
        Commands::Repl { logs } => {
            init_logging(logs);
            let config = load_config(None);
            let registry = ProviderRegistry::from_config(&config);
            repl::run(Dispatcher::new(registry), &config.defaults).await
        }
        Commands::Providers => {
            init_logging(false);
            list_providers()
        }
        Commands::Status => {
            init_logging(false);
            status::run()
        }
    }
}

// ─────────────────────────────────────────────
// Run command
// ─────────────────────────────────────────────

async fn run_once(
    provider: Option<String>,
    task: Option<String>,
    model: Option<String>,
    text: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(None);
    let registry = ProviderRegistry::from_config(&config);

    let provider = provider.unwrap_or_else(|| config.defaults.provider.clone());
    let task = task.unwrap_or_else(|| config.defaults.task.clone());
    let model = match model {
        Some(m) => m,
        None => registry
            .default_model(&provider)
            .map(String::from)
            .unwrap_or_default(),
    };

    // Uploads are restricted to plain-text files.
    let file = match file {
        Some(path) => match helpers::txt_path(&path.to_string_lossy()) {
            Ok(p) => Some(p),
            Err(e) => bail!(e),
        },
        None => None,
    };

    info!(provider = %provider, task = %task, model = %model, "processing request");

    let mut request = DispatchRequest::new(provider, task, model, text.unwrap_or_default());
    if let Some(path) = file {
        request = request.with_file(path);
    }

    let dispatcher = Dispatcher::new(registry);
    let reply = dispatcher.process(&request).await;
    helpers::print_reply(&reply);

    Ok(())
}

// ─────────────────────────────────────────────
// Providers command
// ─────────────────────────────────────────────

fn list_providers() -> Result<()> {
    use colored::Colorize;

    let config = load_config(None);
    let registry = ProviderRegistry::from_config(&config);

    println!();
    for entry in registry.entries() {
        let local = if entry.spec.is_local {
            " (local)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}{}", entry.spec.display_name.bold(), local);
        for (i, model) in entry.models.iter().enumerate() {
            if i == 0 {
                println!("    {} {}", model, "(default)".dimmed());
            } else {
                println!("    {model}");
            }
        }
        println!();
    }

    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("promptdesk=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

//! Shared CLI helpers — path expansion and reply printing.

use std::path::PathBuf;

use colored::Colorize;

use promptdesk_dispatch::Reply;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Resolve a user-supplied upload path: expand `~` and require a `.txt`
/// extension. Uploads are restricted to plain-text files on every surface.
pub fn txt_path(path: &str) -> Result<PathBuf, String> {
    let expanded = expand_tilde(path);
    if expanded.extension().and_then(|e| e.to_str()) != Some("txt") {
        return Err(format!(
            "only .txt files are supported: {}",
            expanded.display()
        ));
    }
    Ok(expanded)
}

/// Print a dispatch reply: the output text plus the three metric fields.
/// Metric fields are left blank when the dispatch failed.
pub fn print_reply(reply: &Reply) {
    println!();
    println!("{}", reply.output);
    println!();

    let (elapsed, input_words, output_words) = match &reply.metrics {
        Some(m) => (
            format!("{} s", m.elapsed_secs),
            m.input_words.to_string(),
            m.output_words.to_string(),
        ),
        None => (String::new(), String::new(), String::new()),
    };

    println!("  {:<16} {}", "⏱ Time:".dimmed(), elapsed);
    println!("  {:<16} {}", "🔤 Input words:".dimmed(), input_words);
    println!("  {:<16} {}", "💬 Output words:".dimmed(), output_words);
    println!();
}

/// Print the banner shown at REPL start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "🗂 PromptDesk".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Type text to process it, /help for commands, or \"exit\" to quit.".dimmed()
    );
    println!();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

//! Utility helpers — word counting, metric rounding, path resolution.

use std::path::PathBuf;

/// Get the PromptDesk data directory (e.g. `~/.promptdesk/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".promptdesk")
}

/// Count whitespace-delimited tokens in a string.
///
/// This is the word-count metric reported for both input and output text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Round a duration in seconds to 2 decimal places.
pub fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

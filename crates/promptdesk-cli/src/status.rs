//! `promptdesk status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use promptdesk_core::config::{get_config_path, load_config};
use promptdesk_providers::registry::PROVIDERS;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "🗂 PromptDesk Status".cyan().bold());
    println!();

    // Config
    let config_exists = config_path.exists();
    println!(
        "  {:<12} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_exists {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    // Defaults
    println!(
        "  {:<12} {} | task: {}",
        "Defaults:".bold(),
        config.defaults.provider,
        config.defaults.task,
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());

    for spec in PROVIDERS {
        let provider_config = config.providers.get_by_name(spec.name);
        let key_in_config = provider_config.map_or(false, |c| c.is_configured());
        let key_in_env = spec
            .env_key
            .map_or(false, |k| std::env::var(k).map_or(false, |v| !v.is_empty()));

        let status = if spec.is_local {
            "✓ local (no key needed)".green().to_string()
        } else if key_in_config {
            format!("{} (key in config)", "✓".green())
        } else if key_in_env {
            format!("{} (key from {})", "✓".green(), spec.env_key.unwrap_or(""))
        } else {
            format!("{}", "· not configured".dimmed())
        };

        let models = provider_config
            .and_then(|c| c.models.as_ref())
            .map(|m| m.join(", "))
            .unwrap_or_else(|| spec.default_models.join(", "));

        println!("    {:<12} {}", spec.display_name, status);
        println!("    {:<12} {}", "", models.dimmed());
    }

    println!();

    Ok(())
}

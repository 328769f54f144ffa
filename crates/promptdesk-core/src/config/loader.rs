//! Config loader — reads `~/.promptdesk/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.promptdesk/config.json`
//! 3. Environment variables `PROMPTDESK_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Provider names with a `PROMPTDESK_PROVIDERS__*` env override.
const PROVIDER_NAMES: &[&str] = &["ollama", "openrouter", "gemini", "groq"];

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `PROMPTDESK_<SECTION>__<FIELD>` (double underscore as delimiter).
///
/// Supported overrides:
/// - `PROMPTDESK_DEFAULTS__PROVIDER` → `defaults.provider`
/// - `PROMPTDESK_DEFAULTS__TASK` → `defaults.task`
/// - `PROMPTDESK_PROVIDERS__<NAME>__API_KEY` → `providers.<name>.api_key`
/// - `PROMPTDESK_PROVIDERS__<NAME>__API_BASE` → `providers.<name>.api_base`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("PROMPTDESK_DEFAULTS__PROVIDER") {
        config.defaults.provider = val;
    }
    if let Ok(val) = std::env::var("PROMPTDESK_DEFAULTS__TASK") {
        config.defaults.task = val;
    }

    for name in PROVIDER_NAMES {
        let upper = name.to_uppercase();
        let provider = config
            .providers
            .get_by_name_mut(name)
            .expect("PROVIDER_NAMES matches schema fields");
        if let Ok(val) = std::env::var(format!("PROMPTDESK_PROVIDERS__{upper}__API_KEY")) {
            provider.api_key = val;
        }
        if let Ok(val) = std::env::var(format!("PROMPTDESK_PROVIDERS__{upper}__API_BASE")) {
            provider.api_base = Some(val);
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        // Should return defaults
        assert_eq!(config.defaults.provider, "ollama");
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "defaults": { "provider": "groq", "task": "Resumen" },
            "providers": {
                "groq": { "apiKey": "gsk-123" }
            }
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.defaults.provider, "groq");
        assert_eq!(config.defaults.task, "Resumen");
        assert_eq!(config.providers.groq.api_key, "gsk-123");
        // Untouched sections keep their defaults
        assert!(!config.providers.gemini.is_configured());
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.defaults.provider, "ollama");
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.defaults.task, "Traducción EN→ES");
    }

    #[test]
    fn test_serialized_config_reloads() {
        let mut config = Config::default();
        config.defaults.provider = "openrouter".to_string();
        config.providers.openrouter.api_key = "sk-or-test".to_string();
        config.providers.openrouter.models =
            Some(vec!["mistralai/mixtral-8x7b".to_string()]);

        let file = write_temp_json(&serde_json::to_string_pretty(&config).unwrap());

        let reloaded = load_config_from_path(file.path());
        assert_eq!(reloaded.defaults.provider, "openrouter");
        assert_eq!(reloaded.providers.openrouter.api_key, "sk-or-test");
        assert_eq!(
            reloaded.providers.openrouter.models.as_ref().unwrap().len(),
            1
        );
    }

    #[test]
    fn test_env_override_provider_key() {
        std::env::set_var("PROMPTDESK_PROVIDERS__GROQ__API_KEY", "gsk-env");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.providers.groq.api_key, "gsk-env");
        std::env::remove_var("PROMPTDESK_PROVIDERS__GROQ__API_KEY");
    }

    #[test]
    fn test_env_override_api_base() {
        std::env::set_var(
            "PROMPTDESK_PROVIDERS__OLLAMA__API_BASE",
            "http://10.0.0.5:11434/v1",
        );
        let config = apply_env_overrides(Config::default());
        assert_eq!(
            config.providers.ollama.api_base.as_deref(),
            Some("http://10.0.0.5:11434/v1")
        );
        std::env::remove_var("PROMPTDESK_PROVIDERS__OLLAMA__API_BASE");
    }

    #[test]
    fn test_env_override_default_provider() {
        std::env::set_var("PROMPTDESK_DEFAULTS__PROVIDER", "gemini");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.defaults.provider, "gemini");
        std::env::remove_var("PROMPTDESK_DEFAULTS__PROVIDER");
    }

}

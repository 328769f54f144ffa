//! Provider registry — static specs for the 4 supported providers plus the
//! runtime registry built once at startup.
//!
//! The static table carries the defaults (API base, model list, credential env
//! var); the loaded config may override any of them per provider. The model
//! lists are illustrative placeholders rather than a verified catalog, which
//! is exactly why they are overridable.

use std::sync::Arc;

use promptdesk_core::config::schema::{Config, ProviderConfig};

use crate::client::ChatClient;
use crate::traits::CompletionBackend;

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one provider
// ─────────────────────────────────────────────

/// Static specification describing one LLM provider.
#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Internal name (e.g. `"openrouter"`).
    pub name: &'static str,
    /// Human-readable name for display and selection. E.g. `"OpenRouter"`.
    pub display_name: &'static str,
    /// Environment variable for the API key, if the provider needs one.
    pub env_key: Option<&'static str>,
    /// Default API base URL.
    pub default_api_base: &'static str,
    /// Default model identifiers, in display order. The first entry is the
    /// pre-selected model for this provider.
    pub default_models: &'static [&'static str],
    /// Whether this is a local/self-hosted provider (no real credential).
    pub is_local: bool,
}

/// Placeholder credential sent to local providers that ignore auth.
const LOCAL_PLACEHOLDER_KEY: &str = "ollama";

// ─────────────────────────────────────────────
// All 4 providers (in display order)
// ─────────────────────────────────────────────

/// Complete list of supported provider specifications.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "ollama",
        display_name: "Ollama",
        env_key: None,
        default_api_base: "http://localhost:11434/v1",
        default_models: &["llama3"],
        is_local: true,
    },
    ProviderSpec {
        name: "openrouter",
        display_name: "OpenRouter",
        env_key: Some("OPEN_ROUTER_API_KEY"),
        default_api_base: "https://openrouter.ai/api/v1",
        default_models: &["anthropic/claude-sonnet-4.5", "mistralai/mixtral-8x7b"],
        is_local: false,
    },
    ProviderSpec {
        name: "gemini",
        display_name: "Gemini",
        env_key: Some("GEMINI_API_KEY"),
        default_api_base: "https://generativelanguage.googleapis.com/v1beta/openai/",
        default_models: &["gemini-2.5-flash", "gemini-2.5-pro"],
        is_local: false,
    },
    ProviderSpec {
        name: "groq",
        display_name: "Groq",
        env_key: Some("GROQ_API_KEY"),
        default_api_base: "https://api.groq.com/openai/v1",
        default_models: &["llama-3.3-70b-versatile", "mixtral-8x7b"],
        is_local: false,
    },
];

/// Find a provider spec by internal or display name.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS
        .iter()
        .find(|spec| spec.name == name || spec.display_name == name)
}

// ─────────────────────────────────────────────
// Runtime registry
// ─────────────────────────────────────────────

/// One registered provider: its spec, its effective model list, and a ready
/// HTTP client.
pub struct ProviderEntry {
    pub spec: &'static ProviderSpec,
    /// Effective model list (config override or the spec defaults).
    pub models: Vec<String>,
    backend: Arc<dyn CompletionBackend>,
}

impl ProviderEntry {
    /// The backend used to issue chat-completion requests.
    pub fn backend(&self) -> Arc<dyn CompletionBackend> {
        Arc::clone(&self.backend)
    }

    /// The pre-selected model: first entry of the model list.
    pub fn default_model(&self) -> Option<&str> {
        self.models.first().map(String::as_str)
    }
}

/// Immutable lookup table from provider name to preconfigured client.
///
/// Built once at startup from the static specs plus the loaded config;
/// never mutated afterwards.
pub struct ProviderRegistry {
    entries: Vec<ProviderEntry>,
}

impl ProviderRegistry {
    /// Build the registry from the loaded configuration.
    ///
    /// A missing credential is not an error here — the provider is still
    /// registered, and authentication failures surface through the normal
    /// call-error path.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = ProviderRegistry::empty();

        for spec in PROVIDERS {
            let provider_config = config
                .providers
                .get_by_name(spec.name)
                .cloned()
                .unwrap_or_default();

            let api_base = provider_config
                .api_base
                .clone()
                .unwrap_or_else(|| spec.default_api_base.to_string());
            let api_key = resolve_api_key(spec, &provider_config);
            let models = effective_models(spec, &provider_config);

            let client = ChatClient::new(api_base, api_key, spec.display_name);
            registry.register(spec, models, Arc::new(client));
        }

        registry
    }

    /// An empty registry. Entries are added with [`register`](Self::register).
    pub fn empty() -> Self {
        ProviderRegistry {
            entries: Vec::new(),
        }
    }

    /// Add a provider entry with an explicit backend.
    pub fn register(
        &mut self,
        spec: &'static ProviderSpec,
        models: Vec<String>,
        backend: Arc<dyn CompletionBackend>,
    ) {
        self.entries.push(ProviderEntry {
            spec,
            models,
            backend,
        });
    }

    /// Look up a provider by internal or display name.
    pub fn get(&self, name: &str) -> Option<&ProviderEntry> {
        self.entries
            .iter()
            .find(|e| e.spec.name == name || e.spec.display_name == name)
    }

    /// All registered entries, in display order.
    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    /// Model list for a provider.
    pub fn models(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(|e| e.models.as_slice())
    }

    /// The pre-selected model for a provider: first entry of its list.
    pub fn default_model(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ProviderEntry::default_model)
    }
}

/// Resolve the credential for a provider.
///
/// Precedence: config key > env var from the spec > local placeholder.
/// Remote providers without any key end up with an empty credential and fail
/// at call time with an authentication error.
fn resolve_api_key(spec: &ProviderSpec, config: &ProviderConfig) -> String {
    if config.is_configured() {
        return config.api_key.clone();
    }
    if let Some(env_key) = spec.env_key {
        if let Ok(key) = std::env::var(env_key) {
            if !key.is_empty() {
                return key;
            }
        }
    }
    if spec.is_local {
        return LOCAL_PLACEHOLDER_KEY.to_string();
    }
    String::new()
}

/// Effective model list: config override when present and non-empty.
fn effective_models(spec: &ProviderSpec, config: &ProviderConfig) -> Vec<String> {
    match &config.models {
        Some(models) if !models.is_empty() => models.clone(),
        _ => spec.default_models.iter().map(|m| m.to_string()).collect(),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

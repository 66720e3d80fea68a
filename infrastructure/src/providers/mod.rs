//! LLM provider adapters
//!
//! Each adapter implements the application's `LlmProvider` port over a
//! hosted HTTP API. Failures never escape an adapter as errors: they are
//! normalized into `GenerationOutcome::Failure` so a round can continue
//! around a broken participant.

pub mod anthropic;
pub mod error;
pub mod gemini;
pub mod openai;

use crate::config::{ConclaveConfig, ProviderType};
use anthropic::AnthropicProvider;
use conclave_application::LlmProvider;
use gemini::GeminiProvider;
use openai::OpenAiProvider;
use std::sync::Arc;
use tracing::warn;

pub use error::ProviderError;

/// Build the active provider set from configuration.
///
/// Entries referencing a missing provider definition are skipped with a
/// warning, matching the tolerant startup behavior of the config layer. A
/// missing API key is not detected here - it surfaces as an auth failure
/// at generation time.
pub fn create_providers(config: &ConclaveConfig) -> Vec<Arc<dyn LlmProvider>> {
    let mut providers: Vec<Arc<dyn LlmProvider>> = Vec::new();

    for key in &config.active_providers {
        let Some(provider_config) = config.providers.get(key) else {
            warn!("Provider '{}' is active but not configured; skipping", key);
            continue;
        };

        match provider_config.provider_type {
            ProviderType::Anthropic => {
                providers.push(Arc::new(AnthropicProvider::new(provider_config)));
            }
            ProviderType::Openai => {
                providers.push(Arc::new(OpenAiProvider::new(provider_config, "OpenAI")));
            }
            ProviderType::Gemini => {
                providers.push(Arc::new(GeminiProvider::new(provider_config)));
            }
            ProviderType::Grok => {
                providers.push(Arc::new(OpenAiProvider::grok(provider_config)));
            }
            ProviderType::OpenaiCompatible => {
                providers.push(Arc::new(OpenAiProvider::new(
                    provider_config,
                    &title_case(key),
                )));
            }
        }
    }

    providers
}

/// Display name for an openai_compatible entry, derived from its config key
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub(crate) fn build_client(timeout_secs: Option<u64>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder.build().unwrap_or_default()
}

/// Resolve an API key: explicit config value first, then the configured
/// (or provider-default) environment variable.
pub(crate) fn resolve_api_key(
    api_key: Option<&str>,
    api_key_env: Option<&str>,
    default_env: &str,
) -> (Option<String>, String) {
    let env_name = api_key_env.unwrap_or(default_env).to_string();
    let key = api_key
        .map(String::from)
        .or_else(|| std::env::var(&env_name).ok())
        .filter(|k| !k.is_empty());
    (key, env_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileProviderConfig;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_builds_three_providers() {
        let config = ConclaveConfig::default();
        let providers = create_providers(&config);

        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"Anthropic"));
        assert!(names.contains(&"OpenAI"));
        assert!(names.contains(&"Gemini"));
    }

    #[test]
    fn test_unconfigured_active_provider_is_skipped() {
        let config = ConclaveConfig {
            active_providers: vec!["anthropic".to_string(), "ghost".to_string()],
            ..ConclaveConfig::default()
        };
        let providers = create_providers(&config);
        assert_eq!(providers.len(), 1);
    }

    #[test]
    fn test_openai_compatible_takes_name_from_key() {
        let config = ConclaveConfig {
            active_providers: vec!["deepseek".to_string()],
            providers: HashMap::from([(
                "deepseek".to_string(),
                FileProviderConfig {
                    provider_type: ProviderType::OpenaiCompatible,
                    model: Some("deepseek-reasoner".to_string()),
                    api_key: None,
                    api_key_env: Some("DEEPSEEK_API_KEY".to_string()),
                    base_url: Some("https://api.deepseek.com/v1".to_string()),
                    max_tokens: None,
                    timeout_secs: None,
                },
            )]),
            flows: HashMap::new(),
        };

        let providers = create_providers(&config);
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name(), "Deepseek");
    }

    #[test]
    fn test_resolve_api_key_prefers_config_value() {
        let (key, env) = resolve_api_key(Some("sk-direct"), None, "CONCLAVE_TEST_UNSET");
        assert_eq!(key.as_deref(), Some("sk-direct"));
        assert_eq!(env, "CONCLAVE_TEST_UNSET");
    }

    #[test]
    fn test_resolve_api_key_missing_everywhere() {
        let (key, _env) = resolve_api_key(None, Some("CONCLAVE_TEST_UNSET"), "ALSO_UNSET");
        assert!(key.is_none());
    }
}

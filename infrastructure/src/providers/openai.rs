//! OpenAI Chat Completions adapter
//!
//! Also backs any OpenAI-compatible endpoint (Grok, DeepSeek, local
//! gateways) via a configurable base URL and key environment variable.

use super::error::ProviderError;
use super::{build_client, resolve_api_key};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use conclave_application::ports::provider::{CompletionOptions, LlmProvider};
use conclave_domain::GenerationOutcome;
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gpt-5.2";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

const GROK_DEFAULT_MODEL: &str = "grok-4";
const GROK_DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";
const GROK_API_KEY_ENV: &str = "XAI_API_KEY";

/// Provider for OpenAI's API and OpenAI-compatible endpoints
pub struct OpenAiProvider {
    name: String,
    model: String,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: &FileProviderConfig, name: &str) -> Self {
        Self::with_defaults(
            config,
            name,
            DEFAULT_MODEL,
            DEFAULT_BASE_URL,
            DEFAULT_API_KEY_ENV,
        )
    }

    /// Grok speaks the OpenAI wire format with its own endpoint and key.
    pub fn grok(config: &FileProviderConfig) -> Self {
        Self::with_defaults(
            config,
            "Grok",
            GROK_DEFAULT_MODEL,
            GROK_DEFAULT_BASE_URL,
            GROK_API_KEY_ENV,
        )
    }

    fn with_defaults(
        config: &FileProviderConfig,
        name: &str,
        default_model: &str,
        default_base_url: &str,
        default_key_env: &str,
    ) -> Self {
        let (api_key, api_key_env) = resolve_api_key(
            config.api_key.as_deref(),
            config.api_key_env.as_deref(),
            default_key_env,
        );
        Self {
            name: name.to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| default_base_url.to_string()),
            api_key,
            api_key_env,
            max_tokens: config.max_tokens,
            client: build_client(config.timeout_secs),
        }
    }

    /// Reasoning models take `max_completion_tokens` and reject an
    /// explicit temperature.
    fn is_reasoning_model(&self) -> bool {
        ["gpt-5", "o1", "o3", "grok-4"]
            .iter()
            .any(|prefix| self.model.starts_with(prefix))
    }

    async fn request(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey(self.api_key_env.clone()))?;

        let mut messages = Vec::new();
        if let Some(system) = options.system_prompt.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let max_tokens = self.max_tokens.unwrap_or(options.max_tokens);
        let reasoning = self.is_reasoning_model();
        let body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: (!reasoning).then_some(max_tokens),
            max_completion_tokens: reasoning.then_some(max_tokens),
            temperature: if reasoning { None } else { options.temperature },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("no choices in response".to_string()))?;
        Ok(choice.message.content.unwrap_or_default())
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str, options: &CompletionOptions) -> GenerationOutcome {
        match self.request(prompt, options).await {
            Ok(text) => GenerationOutcome::success(text),
            Err(e) => GenerationOutcome::failure(
                e.kind(),
                format!("{} failed to generate response: {e}", self.name),
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderType;

    fn config(model: Option<&str>) -> FileProviderConfig {
        FileProviderConfig {
            provider_type: ProviderType::Openai,
            model: model.map(String::from),
            api_key: None,
            api_key_env: Some("CONCLAVE_TEST_UNSET_KEY".to_string()),
            base_url: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn test_reasoning_model_detection() {
        assert!(OpenAiProvider::new(&config(Some("gpt-5.2")), "OpenAI").is_reasoning_model());
        assert!(OpenAiProvider::new(&config(Some("o3-mini")), "OpenAI").is_reasoning_model());
        assert!(!OpenAiProvider::new(&config(Some("gpt-4.1")), "OpenAI").is_reasoning_model());
        assert!(OpenAiProvider::grok(&config(None)).is_reasoning_model());
    }

    #[test]
    fn test_grok_defaults() {
        let grok = OpenAiProvider::grok(&config(None));
        assert_eq!(grok.name(), "Grok");
        assert_eq!(grok.model, GROK_DEFAULT_MODEL);
        assert_eq!(grok.base_url, GROK_DEFAULT_BASE_URL);
    }

    #[test]
    fn test_request_body_for_legacy_model() {
        let body = ChatRequest {
            model: "gpt-4.1",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: Some(512),
            max_completion_tokens: None,
            temperature: Some(0.7),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["max_tokens"], 512);
        assert!(json.get("max_completion_tokens").is_none());
        assert_eq!(json["temperature"], 0.7);
    }

    #[tokio::test]
    async fn test_missing_key_degrades_to_auth_sentinel() {
        let provider = OpenAiProvider::new(&config(None), "OpenAI");
        let outcome = provider
            .generate("hello", &CompletionOptions::default())
            .await;

        assert!(!outcome.is_success());
        assert!(
            outcome
                .into_text()
                .starts_with("[Error] OpenAI failed to generate response")
        );
    }
}

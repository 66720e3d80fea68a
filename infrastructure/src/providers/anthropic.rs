//! Anthropic Messages API adapter

use super::error::ProviderError;
use super::{build_client, resolve_api_key};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use conclave_application::ports::provider::{CompletionOptions, LlmProvider};
use conclave_domain::GenerationOutcome;
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "claude-opus-4-5-20251101";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const API_VERSION: &str = "2023-06-01";

/// Provider for Anthropic's Claude API
pub struct AnthropicProvider {
    model: String,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(config: &FileProviderConfig) -> Self {
        let (api_key, api_key_env) = resolve_api_key(
            config.api_key.as_deref(),
            config.api_key_env.as_deref(),
            DEFAULT_API_KEY_ENV,
        );
        Self {
            model: config.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            api_key_env,
            max_tokens: config.max_tokens,
            client: build_client(config.timeout_secs),
        }
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

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens.unwrap_or(options.max_tokens),
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            system: options.system_prompt.as_deref(),
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let parsed: MessagesResponse = response.json().await?;
        Ok(parsed
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
            .collect())
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn generate(&self, prompt: &str, options: &CompletionOptions) -> GenerationOutcome {
        match self.request(prompt, options).await {
            Ok(text) => GenerationOutcome::success(text),
            Err(e) => GenerationOutcome::failure(
                e.kind(),
                format!("Anthropic failed to generate response: {e}"),
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> FileProviderConfig {
        FileProviderConfig {
            provider_type: crate::config::ProviderType::Anthropic,
            model: None,
            api_key: None,
            api_key_env: Some("CONCLAVE_TEST_UNSET_KEY".to_string()),
            base_url: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn test_defaults_applied() {
        let provider = AnthropicProvider::new(&config());
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.name(), "Anthropic");
    }

    #[tokio::test]
    async fn test_missing_key_degrades_to_auth_sentinel() {
        let provider = AnthropicProvider::new(&config());
        let outcome = provider
            .generate("hello", &CompletionOptions::default())
            .await;

        assert!(!outcome.is_success());
        let text = outcome.into_text();
        assert!(text.starts_with("[Error] Anthropic failed to generate response"));
        assert!(text.contains("CONCLAVE_TEST_UNSET_KEY"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = MessagesRequest {
            model: "claude-opus-4-5-20251101",
            max_tokens: 1024,
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
            system: None,
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "claude-opus-4-5-20251101");
        assert!(json.get("system").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }
}

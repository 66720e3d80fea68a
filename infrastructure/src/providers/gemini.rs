//! Google Gemini generateContent adapter

use super::error::ProviderError;
use super::{build_client, resolve_api_key};
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use conclave_application::ports::provider::{CompletionOptions, LlmProvider};
use conclave_domain::GenerationOutcome;
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Provider for Google's Gemini API
pub struct GeminiProvider {
    model: String,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
    max_tokens: Option<u32>,
    client: reqwest::Client,
}

impl GeminiProvider {
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

        // the system prompt is folded into the user content
        let content = match options.system_prompt.as_deref() {
            Some(system) => format!("{system}\n\n{prompt}"),
            None => prompt.to_string(),
        };

        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: content }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_tokens.unwrap_or(options.max_tokens),
                temperature: options.temperature,
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, body });
        }

        let parsed: GenerateResponse = response.json().await?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("no candidates in response".to_string()))?;
        Ok(candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect())
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str, options: &CompletionOptions) -> GenerationOutcome {
        match self.request(prompt, options).await {
            Ok(text) => GenerationOutcome::success(text),
            Err(e) => GenerationOutcome::failure(
                e.kind(),
                format!("Gemini failed to generate response: {e}"),
            ),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderType;

    fn config() -> FileProviderConfig {
        FileProviderConfig {
            provider_type: ProviderType::Gemini,
            model: None,
            api_key: None,
            api_key_env: Some("CONCLAVE_TEST_UNSET_KEY".to_string()),
            base_url: None,
            max_tokens: Some(2048),
            timeout_secs: None,
        }
    }

    #[test]
    fn test_defaults_applied() {
        let provider = GeminiProvider::new(&config());
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert_eq!(provider.name(), "Gemini");
    }

    #[test]
    fn test_generation_config_serializes_camel_case() {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: 2048,
                temperature: None,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 2048);
        assert!(json["generationConfig"].get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_missing_key_degrades_to_auth_sentinel() {
        let provider = GeminiProvider::new(&config());
        let outcome = provider
            .generate("hello", &CompletionOptions::default())
            .await;

        assert!(!outcome.is_success());
        assert!(
            outcome
                .into_text()
                .starts_with("[Error] Gemini failed to generate response")
        );
    }
}

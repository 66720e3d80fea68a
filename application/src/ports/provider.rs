//! LLM provider port
//!
//! Defines the interface for a single named generation capability.
//! Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use conclave_domain::GenerationOutcome;

/// Options for a completion request
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    /// System prompt biasing the model's role for this call
    pub system_prompt: Option<String>,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature; providers may ignore it for models that do
    /// not accept one
    pub temperature: Option<f32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            system_prompt: None,
            max_tokens: 8192,
            temperature: None,
        }
    }
}

impl CompletionOptions {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// A named participant backed by an LLM provider
///
/// `generate` is infallible by contract: adapters normalize every failure
/// (auth, rate limit, network, malformed response) into a
/// [`GenerationOutcome::Failure`], so one participant's failure never
/// aborts the round for its peers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique display name, used for addressing and filtering
    fn name(&self) -> &str;

    /// Generate a completion for the given prompt
    async fn generate(&self, prompt: &str, options: &CompletionOptions) -> GenerationOutcome;
}

//! Configuration file schema (`conclave.toml`)
//!
//! Example configuration:
//!
//! ```toml
//! active_providers = ["anthropic", "openai", "gemini"]
//!
//! [providers.anthropic]
//! type = "anthropic"
//! model = "claude-opus-4-5-20251101"
//!
//! [flows.basic-ideator]
//! name = "Basic Ideator"
//! flow_type = "basic"
//! max_rounds = 3
//!
//! [flows.basic-ideator.prompts]
//! round_1 = "You are an expert architect..."
//! refinement = "You are reviewing the work of your peers..."
//! ```

use conclave_domain::{FlowDefinition, FlowPrompts, FlowType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of hosted API behind a provider entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Anthropic,
    Openai,
    Gemini,
    OpenaiCompatible,
    Grok,
}

/// Configuration for a single provider (`[providers.<key>]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProviderConfig {
    /// Which API this provider speaks
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    /// Model identifier; each adapter has its own default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Direct API key (not recommended - use the env var instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable to read the API key from; each adapter has a
    /// provider-specific default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Base URL override (OpenAI-compatible endpoints, proxies)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Default max tokens per response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Per-request timeout in seconds; unset means no client timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl FileProviderConfig {
    fn new(provider_type: ProviderType, model: &str) -> Self {
        Self {
            provider_type,
            model: Some(model.to_string()),
            api_key: None,
            api_key_env: None,
            base_url: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

/// Root configuration for conclave
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConclaveConfig {
    /// Providers constructed at startup, by `[providers]` key
    pub active_providers: Vec<String>,
    /// Provider definitions
    pub providers: HashMap<String, FileProviderConfig>,
    /// Flow definitions, by flow key
    pub flows: HashMap<String, FlowDefinition>,
}

impl ConclaveConfig {
    /// Look up a flow by its configuration key.
    pub fn flow(&self, name: &str) -> Option<&FlowDefinition> {
        self.flows.get(name)
    }

    /// Sorted flow keys, for error messages and `--list-flows`.
    pub fn flow_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.flows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ConclaveConfig {
    fn default() -> Self {
        let providers = HashMap::from([
            (
                "anthropic".to_string(),
                FileProviderConfig::new(ProviderType::Anthropic, "claude-opus-4-5-20251101"),
            ),
            (
                "openai".to_string(),
                FileProviderConfig::new(ProviderType::Openai, "gpt-5.2"),
            ),
            (
                "gemini".to_string(),
                FileProviderConfig::new(ProviderType::Gemini, "gemini-2.0-flash"),
            ),
            (
                "grok".to_string(),
                FileProviderConfig {
                    base_url: Some("https://api.x.ai/v1".to_string()),
                    ..FileProviderConfig::new(ProviderType::Grok, "grok-4")
                },
            ),
        ]);

        let flows = HashMap::from([
            (
                "basic-ideator".to_string(),
                FlowDefinition {
                    name: "Basic Ideator".to_string(),
                    description: Some(
                        "All models brainstorm independently, then everyone sees everyone's \
                         work and refines. Democratic round-robin."
                            .to_string(),
                    ),
                    flow_type: FlowType::Basic,
                    max_rounds: 3,
                    default_leader: None,
                    active_providers: None,
                    prompts: FlowPrompts {
                        round_1: "You are an expert architect. Analyze the user's request and \
                                  provide a comprehensive, actionable plan. Be creative but \
                                  grounded."
                            .to_string(),
                        refinement: "You are reviewing the work of your peers. Attached are \
                                     their proposals, along with your original one. Critique \
                                     their approaches, identify what they did better than you, \
                                     and synthesize a new, superior version (vNext) of your plan \
                                     that incorporates their best ideas while maintaining your \
                                     unique strengths."
                            .to_string(),
                        leader_synthesis: None,
                    },
                },
            ),
            (
                "leading-ideator".to_string(),
                FlowDefinition {
                    name: "Leading Ideator".to_string(),
                    description: Some(
                        "One model leads and synthesizes. Others contribute ideas, leader \
                         distills the best into a unified vision."
                            .to_string(),
                    ),
                    flow_type: FlowType::Leading,
                    max_rounds: 4,
                    default_leader: Some("anthropic".to_string()),
                    active_providers: None,
                    prompts: FlowPrompts {
                        round_1: "You are an expert architect. Analyze the user's request and \
                                  provide a comprehensive, actionable plan. Be creative but \
                                  grounded."
                            .to_string(),
                        refinement: "The lead architect has synthesized a unified plan from all \
                                     contributions. Review their synthesis below. Identify gaps, \
                                     improvements, or alternative approaches they may have \
                                     missed. Provide your refined perspective."
                            .to_string(),
                        leader_synthesis: Some(
                            "You are the lead architect synthesizing input from your team. \
                             Review all contributions below. Extract the best ideas from each, \
                             resolve conflicts, and create a unified, superior plan that \
                             represents the best thinking of the group. Be decisive but \
                             acknowledge strong alternative viewpoints."
                                .to_string(),
                        ),
                    },
                },
            ),
            (
                "audit".to_string(),
                FlowDefinition {
                    name: "Code Audit".to_string(),
                    description: Some(
                        "Multiple security experts analyze code, then cross-review findings."
                            .to_string(),
                    ),
                    flow_type: FlowType::Basic,
                    max_rounds: 2,
                    default_leader: None,
                    active_providers: None,
                    prompts: FlowPrompts {
                        round_1: "You are a senior security engineer. Analyze the attached code \
                                  for vulnerabilities, logical errors, and code smell. Be \
                                  ruthless."
                            .to_string(),
                        refinement: "Review the findings of the other auditors. Did you miss \
                                     anything they found? Verify their claims. Output a \
                                     finalized, unified list of critical issues."
                            .to_string(),
                        leader_synthesis: None,
                    },
                },
            ),
        ]);

        Self {
            active_providers: vec![
                "anthropic".to_string(),
                "openai".to_string(),
                "gemini".to_string(),
            ],
            providers,
            flows,
        }
    }
}

//! Flow definition - the static configuration record for a flow run

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Interaction topology of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    /// Round-robin: all participants ideate, then refine seeing all peers
    #[default]
    Basic,
    /// Hub-and-spoke: a leader periodically synthesizes all contributions
    Leading,
}

impl FlowType {
    pub fn as_str(&self) -> &str {
        match self {
            FlowType::Basic => "basic",
            FlowType::Leading => "leading",
        }
    }
}

impl std::fmt::Display for FlowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prompt templates used by a flow.
///
/// Each value is either literal prompt text or a path to a `.md`/`.txt`
/// file; resolution happens at run time, not at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPrompts {
    /// Template for the independent ideation round
    pub round_1: String,
    /// Template for refinement / contributor-response rounds
    pub refinement: String,
    /// Template for leader synthesis steps (leading flows only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_synthesis: Option<String>,
}

impl FlowPrompts {
    /// The synthesis template, falling back to the refinement template
    /// when no dedicated one is configured.
    pub fn synthesis_template(&self) -> &str {
        self.leader_synthesis.as_deref().unwrap_or(&self.refinement)
    }
}

fn default_max_rounds() -> u32 {
    2
}

/// Configuration for a single flow (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDefinition {
    /// Display name of the flow
    pub name: String,
    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Interaction topology
    #[serde(default)]
    pub flow_type: FlowType,
    /// Total round budget. For leading flows this bounds the number of
    /// steps, not full synthesis/response cycles.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    /// Leader participant name (required for leading flows)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_leader: Option<String>,
    /// Restrict the flow to a subset of the configured participants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_providers: Option<Vec<String>>,
    /// Prompt templates
    pub prompts: FlowPrompts,
}

impl FlowDefinition {
    /// Validate the definition before any generation is attempted.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_rounds < 1 {
            return Err(DomainError::InvalidRoundBudget(self.max_rounds));
        }
        if self.flow_type == FlowType::Leading && self.default_leader.is_none() {
            return Err(DomainError::MissingLeader(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompts() -> FlowPrompts {
        FlowPrompts {
            round_1: "Brainstorm.".to_string(),
            refinement: "Refine.".to_string(),
            leader_synthesis: None,
        }
    }

    #[test]
    fn test_synthesis_template_fallback() {
        let mut p = prompts();
        assert_eq!(p.synthesis_template(), "Refine.");

        p.leader_synthesis = Some("Synthesize.".to_string());
        assert_eq!(p.synthesis_template(), "Synthesize.");
    }

    #[test]
    fn test_validate_round_budget() {
        let flow = FlowDefinition {
            name: "test".to_string(),
            description: None,
            flow_type: FlowType::Basic,
            max_rounds: 0,
            default_leader: None,
            active_providers: None,
            prompts: prompts(),
        };
        assert!(matches!(
            flow.validate(),
            Err(DomainError::InvalidRoundBudget(0))
        ));
    }

    #[test]
    fn test_validate_leading_requires_leader() {
        let flow = FlowDefinition {
            name: "leading".to_string(),
            description: None,
            flow_type: FlowType::Leading,
            max_rounds: 4,
            default_leader: None,
            active_providers: None,
            prompts: prompts(),
        };
        assert!(matches!(flow.validate(), Err(DomainError::MissingLeader(_))));

        let flow = FlowDefinition {
            default_leader: Some("anthropic".to_string()),
            ..flow
        };
        assert!(flow.validate().is_ok());
    }

    #[test]
    fn test_flow_type_default_is_basic() {
        assert_eq!(FlowType::default(), FlowType::Basic);
        assert_eq!(FlowType::Leading.as_str(), "leading");
    }
}

//! Prompt templates for flow rounds
//!
//! All prompt text is assembled here, from resolved templates plus prior
//! round state. Participant ordering is taken from the caller's list, so
//! identical inputs produce byte-identical prompts across runs.

use std::collections::HashMap;

const NO_OUTPUT: &str = "No output";

/// Templates for generating prompts at each stage of a flow
pub struct PromptTemplate;

impl PromptTemplate {
    /// Round-1 prompt: the resolved template with the task input appended.
    pub fn round_one(template: &str, input: &str) -> String {
        format!("{template}\n\n[INPUT FILE START]\n{input}\n[INPUT FILE END]")
    }

    /// Peer-review block for `me`: every *other* participant's prior
    /// output, labeled, in the order of `participants`.
    pub fn peer_review_block(
        me: &str,
        participants: &[String],
        outputs: &HashMap<String, String>,
    ) -> String {
        participants
            .iter()
            .filter(|name| name.as_str() != me)
            .map(|name| {
                format!(
                    "[PEER REVIEW FROM {}]\n{}",
                    name.to_uppercase(),
                    outputs.get(name).map_or(NO_OUTPUT, String::as_str)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Refinement prompt for a round-robin convergence round.
    pub fn refinement(template: &str, round: u32, own_previous: &str, peer_block: &str) -> String {
        format!(
            "{template}\n\n\
             [YOUR PREVIOUS VERSION (v{prev})]\n{own_previous}\n\n\
             [PEER REVIEWS]\n{peer_block}\n\n\
             [TASK]\n\
             Based on the critiques and ideas from your peers, output the v{round} version of the plan.",
            prev = round - 1,
        )
    }

    /// All contributions, labeled, separated, in the order of `participants`.
    pub fn contributions_block(
        participants: &[String],
        outputs: &HashMap<String, String>,
    ) -> String {
        participants
            .iter()
            .map(|name| {
                format!(
                    "[CONTRIBUTION FROM {}]\n{}",
                    name.to_uppercase(),
                    outputs.get(name).map_or(NO_OUTPUT, String::as_str)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n---\n\n")
    }

    /// Leader synthesis prompt for a leading-flow synthesis step.
    pub fn leader_synthesis(template: &str, step: u32, contributions: &str) -> String {
        format!(
            "{template}\n\n\
             [ALL CONTRIBUTIONS]\n{contributions}\n\n\
             [TASK]\n\
             Synthesize a unified v{step} plan that incorporates the best ideas from all contributors.",
        )
    }

    /// Contributor prompt responding to the leader's latest synthesis.
    pub fn contributor_response(
        template: &str,
        step: u32,
        own_previous: &str,
        synthesis: &str,
    ) -> String {
        format!(
            "{template}\n\n\
             [YOUR PREVIOUS VERSION (v{prev})]\n{own_previous}\n\n\
             [LEADER'S SYNTHESIS (v{synth})]\n{synthesis}\n\n\
             [TASK]\n\
             Based on the leader's synthesis, provide your v{step} response. \
             Identify improvements, gaps, or alternative approaches.",
            prev = step - 2,
            synth = step - 1,
        )
    }

    // ==================== System prompts ====================

    /// System prompt used during refinement rounds.
    pub fn refinement_system(round: u32, max_rounds: u32) -> String {
        format!(
            "You are participating in a refinement loop (Round {round} of {max_rounds}). \
             Critically analyze peer feedback and improve your work."
        )
    }

    /// System prompt for the leader during synthesis steps.
    pub fn leader_system(round: u32, max_rounds: u32) -> String {
        format!(
            "You are the lead architect (Round {round} of {max_rounds}). \
             Your role is to synthesize the best ideas from your team into a cohesive plan."
        )
    }

    /// System prompt for contributors responding to the leader's synthesis.
    pub fn contributor_system(round: u32, max_rounds: u32) -> String {
        format!(
            "You are a contributing architect (Round {round} of {max_rounds}). \
             Review the leader's synthesis and provide your refined perspective."
        )
    }
}

//! Run Leading Flow use case
//!
//! Implements the hub-and-spoke pattern:
//!
//! Step 1: everyone ideates independently (parallel)
//! Step 2: LEADER synthesizes all outputs into a unified vision
//! Step 3: NON-LEADERS respond to the leader's synthesis
//! Step 4: LEADER synthesizes again from the responses
//! ... alternating strictly until the step budget is spent.
//!
//! `max_rounds` bounds the synthesis/response steps after the ideation
//! round: an even budget ends on a contributor-response step, an odd one
//! ends on a leader synthesis. When the budget runs out right after a
//! synthesis, contributors are not invoked for the incomplete half-cycle
//! and the synthesis alone becomes the final history entry.

use crate::ports::output_sink::OutputSink;
use crate::ports::progress::{FlowProgress, NoProgress};
use crate::ports::prompt_store::PromptStore;
use crate::ports::provider::{CompletionOptions, LlmProvider};
use crate::prompt_resolver::resolve_prompt;
use crate::use_cases::FlowError;
use crate::use_cases::shared::{generate_round, participant_names, read_input_file};
use conclave_domain::{
    FlowDefinition, NameResolution, PromptTemplate, RoundHistory, RoundState, resolve_name,
};
use std::sync::Arc;
use tracing::info;

/// Which half of the synthesis/response cycle runs next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CyclePhase {
    Synthesizing,
    Responding,
}

/// Use case for running a hub-and-spoke flow
pub struct RunLeadingFlowUseCase {
    participants: Vec<Arc<dyn LlmProvider>>,
    flow: FlowDefinition,
    sink: Arc<dyn OutputSink>,
    prompt_store: Arc<dyn PromptStore>,
}

impl RunLeadingFlowUseCase {
    pub fn new(
        participants: Vec<Arc<dyn LlmProvider>>,
        flow: FlowDefinition,
        sink: Arc<dyn OutputSink>,
        prompt_store: Arc<dyn PromptStore>,
    ) -> Self {
        Self {
            participants,
            flow,
            sink,
            prompt_store,
        }
    }

    /// Resolve the configured leader against the participant list.
    ///
    /// Matching is fuzzy; zero matches and ambiguous matches are both
    /// configuration errors raised before any generation.
    fn resolve_leader(&self) -> Result<usize, FlowError> {
        let names = participant_names(&self.participants);
        let leader_name = self.flow.default_leader.as_deref().unwrap_or_default();

        match resolve_name(&names, leader_name) {
            NameResolution::Unique(index) => Ok(index),
            NameResolution::NotFound => Err(FlowError::LeaderNotFound {
                name: leader_name.to_string(),
                available: names.join(", "),
            }),
            NameResolution::Ambiguous(matches) => Err(FlowError::AmbiguousLeader {
                name: leader_name.to_string(),
                matches: matches.join(", "),
            }),
        }
    }

    /// Execute the flow with default (no-op) progress
    pub async fn run(
        &self,
        input_file: &str,
        initial_prompt_override: Option<&str>,
    ) -> Result<(), FlowError> {
        self.run_with_progress(input_file, initial_prompt_override, &NoProgress)
            .await
    }

    /// Execute the flow with progress callbacks
    pub async fn run_with_progress(
        &self,
        input_file: &str,
        initial_prompt_override: Option<&str>,
        progress: &dyn FlowProgress,
    ) -> Result<(), FlowError> {
        self.flow.validate()?;
        let leader_index = self.resolve_leader()?;

        let leader = Arc::clone(&self.participants[leader_index]);
        let contributors: Vec<Arc<dyn LlmProvider>> = self
            .participants
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != leader_index)
            .map(|(_, p)| Arc::clone(p))
            .collect();

        // leader first, then contributors - this fixes the labeling order
        // of every contributions block
        let mut ordered: Vec<Arc<dyn LlmProvider>> = vec![Arc::clone(&leader)];
        ordered.extend(contributors.iter().cloned());
        let ordered_names = participant_names(&ordered);

        info!(
            flow = %self.flow.name,
            leader = leader.name(),
            contributors = contributors.len(),
            output = %self.sink.location(),
            "Starting leading flow"
        );

        let input_content = read_input_file(input_file)?;
        let mut history = RoundHistory::new();

        // --- Everyone ideates independently ---
        let label = "Step 1: Everyone ideates independently";
        progress.on_round_start(label, ordered.len());

        let round1_template = match initial_prompt_override {
            Some(text) => text.to_string(),
            None => resolve_prompt(self.prompt_store.as_ref(), &self.flow.prompts.round_1),
        };
        let round1_prompt = PromptTemplate::round_one(&round1_template, &input_content);

        let tasks: Vec<_> = ordered
            .iter()
            .map(|p| {
                (
                    Arc::clone(p),
                    round1_prompt.clone(),
                    CompletionOptions::default(),
                )
            })
            .collect();

        let mut prev_outputs = generate_round(tasks, 1, None, &self.sink, progress).await?;

        let mut round1 = RoundState::new(1);
        round1.outputs = prev_outputs.clone();
        history.push(round1);
        progress.on_round_complete(label);
        info!("Ideation complete");

        // --- Alternating synthesis / response cycle ---
        let total_steps = self.flow.max_rounds;
        let mut step: u32 = 1;
        let mut phase = CyclePhase::Synthesizing;
        let mut last_synthesis = String::new();

        while step <= total_steps {
            // ideation occupied round 1, so step s displays as round s+1
            let display_round = step + 1;

            match phase {
                CyclePhase::Synthesizing => {
                    let label = format!("Step {}: Leader synthesizes", display_round);
                    progress.on_round_start(&label, 1);

                    let contributions =
                        PromptTemplate::contributions_block(&ordered_names, &prev_outputs);
                    let template = resolve_prompt(
                        self.prompt_store.as_ref(),
                        self.flow.prompts.synthesis_template(),
                    );
                    let prompt =
                        PromptTemplate::leader_synthesis(&template, display_round, &contributions);
                    let options = CompletionOptions::default()
                        .with_system_prompt(PromptTemplate::leader_system(
                            display_round,
                            total_steps + 1,
                        ));

                    let outcome = leader.generate(&prompt, &options).await;
                    progress.on_participant_complete(leader.name(), outcome.is_success());

                    last_synthesis = outcome.into_text();
                    self.sink.write(
                        leader.name(),
                        display_round,
                        Some("synthesis"),
                        &last_synthesis,
                    )?;

                    progress.on_round_complete(&label);
                    info!("Leader synthesized (step {})", display_round);

                    if step == total_steps {
                        // no budget left for a contributor response: the
                        // synthesis alone closes the history
                        let mut state = RoundState::new(display_round);
                        state.insert(leader.name(), last_synthesis.clone());
                        history.push(state);
                        break;
                    }

                    phase = CyclePhase::Responding;
                }
                CyclePhase::Responding => {
                    let label = format!("Step {}: Contributors respond to leader", display_round);
                    progress.on_round_start(&label, contributors.len());

                    let refinement_template = resolve_prompt(
                        self.prompt_store.as_ref(),
                        &self.flow.prompts.refinement,
                    );
                    let system_prompt =
                        PromptTemplate::contributor_system(display_round, total_steps + 1);

                    let tasks: Vec<_> = contributors
                        .iter()
                        .map(|p| {
                            let own_previous =
                                prev_outputs.get(p.name()).map_or("", String::as_str);
                            let prompt = PromptTemplate::contributor_response(
                                &refinement_template,
                                display_round,
                                own_previous,
                                &last_synthesis,
                            );
                            let options = CompletionOptions::default()
                                .with_system_prompt(system_prompt.clone());
                            (Arc::clone(p), prompt, options)
                        })
                        .collect();

                    let mut merged =
                        generate_round(tasks, display_round, None, &self.sink, progress).await?;

                    // the leader's synthesis is carried forward unchanged so
                    // the next synthesis sees every participant's latest output
                    merged.insert(leader.name().to_string(), last_synthesis.clone());

                    let mut state = RoundState::new(display_round);
                    state.outputs = merged.clone();
                    history.push(state);
                    prev_outputs = merged;

                    progress.on_round_complete(&label);
                    info!("Contributors responded (step {})", display_round);

                    phase = CyclePhase::Synthesizing;
                }
            }

            step += 1;
        }

        info!(
            steps = history.len(),
            leader = leader.name(),
            output = %self.sink.location(),
            "Flow complete; the leader's final synthesis is the recommended output"
        );
        Ok(())
    }
}

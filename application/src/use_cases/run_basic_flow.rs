//! Run Basic Flow use case
//!
//! Implements the round-robin democratic pattern:
//!
//! Round 1 (Divergence): everyone brainstorms independently
//! Round 2+ (Convergence): everyone sees ALL peer outputs and refines
//!
//! All participants are equal; there is no leader.

use crate::ports::output_sink::OutputSink;
use crate::ports::progress::{FlowProgress, NoProgress};
use crate::ports::prompt_store::PromptStore;
use crate::ports::provider::{CompletionOptions, LlmProvider};
use crate::prompt_resolver::resolve_prompt;
use crate::use_cases::FlowError;
use crate::use_cases::shared::{filter_active, generate_round, participant_names, read_input_file};
use conclave_domain::{FlowDefinition, PromptTemplate, RoundHistory, RoundState};
use std::sync::Arc;
use tracing::info;

/// Use case for running a round-robin flow
pub struct RunBasicFlowUseCase {
    participants: Vec<Arc<dyn LlmProvider>>,
    flow: FlowDefinition,
    sink: Arc<dyn OutputSink>,
    prompt_store: Arc<dyn PromptStore>,
}

impl RunBasicFlowUseCase {
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
        let input_content = read_input_file(input_file)?;

        let active = filter_active(&self.participants, self.flow.active_providers.as_deref());
        if active.is_empty() {
            return Err(FlowError::NoActiveParticipants);
        }
        let names = participant_names(&active);

        info!(
            flow = %self.flow.name,
            participants = active.len(),
            output = %self.sink.location(),
            "Starting basic flow"
        );

        let mut history = RoundHistory::new();

        // --- Round 1: Divergence ---
        let label = "Round 1: Divergence (Brainstorming)";
        progress.on_round_start(label, active.len());

        let round1_template = match initial_prompt_override {
            Some(text) => text.to_string(),
            None => resolve_prompt(self.prompt_store.as_ref(), &self.flow.prompts.round_1),
        };
        let round1_prompt = PromptTemplate::round_one(&round1_template, &input_content);

        let tasks: Vec<_> = active
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
        info!("Round 1 complete");

        // --- Convergence rounds (2..N) ---
        for round in 2..=self.flow.max_rounds {
            let label = format!("Round {}: Convergence (Refinement)", round);
            progress.on_round_start(&label, active.len());

            let refinement_template =
                resolve_prompt(self.prompt_store.as_ref(), &self.flow.prompts.refinement);
            let system_prompt = PromptTemplate::refinement_system(round, self.flow.max_rounds);

            let tasks: Vec<_> = active
                .iter()
                .map(|p| {
                    let own_previous = prev_outputs.get(p.name()).map_or("", String::as_str);
                    let peer_block =
                        PromptTemplate::peer_review_block(p.name(), &names, &prev_outputs);
                    let prompt = PromptTemplate::refinement(
                        &refinement_template,
                        round,
                        own_previous,
                        &peer_block,
                    );
                    let options =
                        CompletionOptions::default().with_system_prompt(system_prompt.clone());
                    (Arc::clone(p), prompt, options)
                })
                .collect();

            prev_outputs = generate_round(tasks, round, None, &self.sink, progress).await?;

            let mut state = RoundState::new(round);
            state.outputs = prev_outputs.clone();
            history.push(state);
            progress.on_round_complete(&label);
            info!("Round {} complete", round);
        }

        info!(
            rounds = history.len(),
            output = %self.sink.location(),
            "Flow complete"
        );
        Ok(())
    }
}

//! Helpers shared by the flow engines

use crate::ports::output_sink::OutputSink;
use crate::ports::progress::FlowProgress;
use crate::ports::provider::{CompletionOptions, LlmProvider};
use crate::use_cases::FlowError;
use conclave_domain::flow::matching::name_matches;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::warn;

/// Read the task input synchronously before any generation begins.
pub(crate) fn read_input_file(path: &str) -> Result<String, FlowError> {
    std::fs::read_to_string(path).map_err(|source| FlowError::Input {
        path: path.to_string(),
        source,
    })
}

/// Apply a flow's active-participant filter.
///
/// Matching is fuzzy (case-insensitive substring, both directions); with
/// no filter configured, every participant is active.
pub(crate) fn filter_active(
    participants: &[Arc<dyn LlmProvider>],
    filter: Option<&[String]>,
) -> Vec<Arc<dyn LlmProvider>> {
    match filter {
        None => participants.to_vec(),
        Some(queries) => participants
            .iter()
            .filter(|p| queries.iter().any(|q| name_matches(p.name(), q)))
            .cloned()
            .collect(),
    }
}

pub(crate) fn participant_names(participants: &[Arc<dyn LlmProvider>]) -> Vec<String> {
    participants.iter().map(|p| p.name().to_string()).collect()
}

/// Fan a round out over its participants and join all of them.
///
/// Every call settles before the round completes; failures arrive as
/// sentinel text like any other output. Each settled output is persisted
/// to the sink under the given round number and suffix.
pub(crate) async fn generate_round(
    tasks: Vec<(Arc<dyn LlmProvider>, String, CompletionOptions)>,
    round: u32,
    suffix: Option<&str>,
    sink: &Arc<dyn OutputSink>,
    progress: &dyn FlowProgress,
) -> Result<HashMap<String, String>, FlowError> {
    let mut join_set = JoinSet::new();

    for (provider, prompt, options) in tasks {
        join_set.spawn(async move {
            let name = provider.name().to_string();
            let outcome = provider.generate(&prompt, &options).await;
            (name, outcome)
        });
    }

    let mut outputs = HashMap::new();

    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((name, outcome)) => {
                let success = outcome.is_success();
                if !success {
                    warn!("Participant {} failed in round {}", name, round);
                }
                progress.on_participant_complete(&name, success);

                let text = outcome.into_text();
                sink.write(&name, round, suffix, &text)?;
                outputs.insert(name, text);
            }
            Err(e) => {
                warn!("Task join error: {}", e);
            }
        }
    }

    Ok(outputs)
}

//! Round state and history
//!
//! The history is append-only and lives in memory for the duration of a
//! single run. Each entry holds one output per participant asked to
//! generate in that round; failed generations are recorded as sentinel
//! text, never omitted.

use std::collections::HashMap;

/// Outputs of a single completed round (or step, for leading flows)
#[derive(Debug, Clone)]
pub struct RoundState {
    /// 1-based round number
    pub round: u32,
    /// Output per participant name
    pub outputs: HashMap<String, String>,
}

impl RoundState {
    pub fn new(round: u32) -> Self {
        Self {
            round,
            outputs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, participant: impl Into<String>, output: impl Into<String>) {
        self.outputs.insert(participant.into(), output.into());
    }

    pub fn output_of(&self, participant: &str) -> Option<&str> {
        self.outputs.get(participant).map(String::as_str)
    }
}

/// Append-only sequence of round states with monotonically increasing
/// round numbers starting at 1.
#[derive(Debug, Clone, Default)]
pub struct RoundHistory {
    entries: Vec<RoundState>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The round number the next entry must carry.
    pub fn next_round(&self) -> u32 {
        self.entries.last().map_or(1, |state| state.round + 1)
    }

    /// Append a completed round.
    ///
    /// Round numbers must increase strictly; the engines drive the history
    /// sequentially between joins, so a gap or repeat is a logic error.
    pub fn push(&mut self, state: RoundState) {
        debug_assert!(
            self.entries
                .last()
                .is_none_or(|last| state.round > last.round),
            "round numbers must increase strictly"
        );
        self.entries.push(state);
    }

    pub fn last(&self) -> Option<&RoundState> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoundState> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_round_starts_at_one() {
        let history = RoundHistory::new();
        assert_eq!(history.next_round(), 1);
    }

    #[test]
    fn test_push_and_last() {
        let mut history = RoundHistory::new();
        let mut round1 = RoundState::new(1);
        round1.insert("Anthropic", "draft");
        history.push(round1);

        assert_eq!(history.len(), 1);
        assert_eq!(history.next_round(), 2);
        assert_eq!(
            history.last().and_then(|s| s.output_of("Anthropic")),
            Some("draft")
        );
    }

    #[test]
    fn test_round_numbers_increase() {
        let mut history = RoundHistory::new();
        history.push(RoundState::new(1));
        history.push(RoundState::new(2));
        // leading flows may skip a number when a half-cycle is cut short
        history.push(RoundState::new(4));

        let rounds: Vec<u32> = history.iter().map(|s| s.round).collect();
        assert_eq!(rounds, vec![1, 2, 4]);
    }
}

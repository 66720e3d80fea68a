//! Progress notification port
//!
//! Defines the interface for reporting progress during flow execution.

/// Callback for progress updates during a flow run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait FlowProgress: Send + Sync {
    /// Called when a round or step starts
    fn on_round_start(&self, label: &str, total_tasks: usize);

    /// Called when one participant's generation settles
    fn on_participant_complete(&self, participant: &str, success: bool);

    /// Called when a round or step completes
    fn on_round_complete(&self, label: &str);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl FlowProgress for NoProgress {
    fn on_round_start(&self, _label: &str, _total_tasks: usize) {}
    fn on_participant_complete(&self, _participant: &str, _success: bool) {}
    fn on_round_complete(&self, _label: &str) {}
}

//! Output sink port
//!
//! One artifact is written per (participant, round) pair, with an optional
//! suffix distinguishing leader synthesis steps. Write failures are fatal
//! to the run.

use thiserror::Error;

/// Errors that can occur while persisting an artifact
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for per-round participant outputs
pub trait OutputSink: Send + Sync {
    /// Persist one participant's output for a round.
    ///
    /// The destination is created lazily on first write; a run that fails
    /// before any generation leaves nothing behind.
    fn write(
        &self,
        participant: &str,
        round: u32,
        suffix: Option<&str>,
        content: &str,
    ) -> Result<(), SinkError>;

    /// Human-readable location of the sink, for operator display
    fn location(&self) -> String;
}

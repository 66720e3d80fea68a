//! Use cases - the flow execution engines

pub mod run_basic_flow;
pub mod run_leading_flow;
pub(crate) mod shared;

use crate::ports::output_sink::SinkError;
use conclave_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while executing a flow
///
/// Provider failures are not represented here: they degrade to sentinel
/// outputs and the flow continues. Everything below is fatal and, apart
/// from I/O, is raised before any generation call is attempted.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("No active participants found for this flow configuration")]
    NoActiveParticipants,

    #[error("Leader '{name}' not found. Available participants: {available}")]
    LeaderNotFound { name: String, available: String },

    #[error("Leader '{name}' is ambiguous; it matches: {matches}")]
    AmbiguousLeader { name: String, matches: String },

    #[error("Invalid flow definition: {0}")]
    InvalidFlow(#[from] DomainError),

    #[error("Failed to read input file '{path}': {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Sink(#[from] SinkError),
}

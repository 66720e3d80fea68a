//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Flow must have at least one round, got {0}")]
    InvalidRoundBudget(u32),

    #[error("Leading flow '{0}' has no default leader configured")]
    MissingLeader(String),

    #[error("Invalid flow definition: {0}")]
    InvalidFlow(String),
}

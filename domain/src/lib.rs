//! Domain layer for conclave
//!
//! This crate contains the core business logic for multi-provider flows.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Flow
//!
//! A flow is a multi-round collaboration between LLM providers:
//!
//! - **Basic flow**: democratic round-robin. Everyone ideates independently,
//!   then everyone sees all peer outputs and refines.
//! - **Leading flow**: hub-and-spoke. One participant leads and periodically
//!   synthesizes the contributions of the others.
//!
//! ## Round History
//!
//! Each completed round (or step, for leading flows) records one output per
//! participant. The history drives the prompts of the following round.

pub mod core;
pub mod flow;
pub mod generation;
pub mod prompt;
pub mod round;

// Re-export commonly used types
pub use core::error::DomainError;
pub use flow::{
    definition::{FlowDefinition, FlowPrompts, FlowType},
    matching::{NameResolution, name_matches, resolve_name},
};
pub use generation::{GenerationErrorKind, GenerationOutcome};
pub use prompt::template::PromptTemplate;
pub use round::state::{RoundHistory, RoundState};

//! Application layer for conclave
//!
//! This crate defines the ports (provider, output sink, prompt store,
//! progress) and the two flow engine use cases. Adapters live in the
//! infrastructure layer; wiring happens in the binary.

pub mod ports;
pub mod prompt_resolver;
pub mod use_cases;

// Re-export commonly used types
pub use ports::output_sink::{OutputSink, SinkError};
pub use ports::progress::{FlowProgress, NoProgress};
pub use ports::prompt_store::PromptStore;
pub use ports::provider::{CompletionOptions, LlmProvider};
pub use prompt_resolver::resolve_prompt;
pub use use_cases::{
    FlowError, run_basic_flow::RunBasicFlowUseCase, run_leading_flow::RunLeadingFlowUseCase,
};

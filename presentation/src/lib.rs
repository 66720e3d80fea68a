//! Presentation layer for conclave
//!
//! CLI argument definitions and terminal progress reporting.

pub mod cli;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use progress::reporter::{ProgressReporter, SimpleProgress};

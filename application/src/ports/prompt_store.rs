//! Prompt store port
//!
//! Backs prompt-reference resolution. Kept behind a port so the
//! literal-vs-path heuristic can be tested without touching a filesystem.

/// Source of prompt files referenced from flow configuration
pub trait PromptStore: Send + Sync {
    /// Load the file at `path`, returning `None` if it does not exist or
    /// cannot be read.
    fn load(&self, path: &str) -> Option<String>;
}

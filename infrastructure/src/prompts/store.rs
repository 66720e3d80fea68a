//! Filesystem-backed prompt store

use conclave_application::ports::prompt_store::PromptStore;
use tracing::warn;

/// Loads prompt files from the local filesystem, relative to the current
/// working directory (or absolute).
pub struct FsPromptStore;

impl PromptStore for FsPromptStore {
    fn load(&self, path: &str) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read prompt file {}: {}", path, e);
                None
            }
        }
    }
}

//! Run context - unique run identifier and derived output location

use std::path::PathBuf;
use uuid::Uuid;

/// Context for a single flow run
///
/// Created once at engine construction and immutable for the run's
/// lifetime. The directory itself is created lazily by the sink, so a run
/// that fails before any generation leaves nothing on disk.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Short unique run identifier
    pub run_id: String,
    /// Output directory for this run's artifacts
    pub run_dir: PathBuf,
}

impl RunContext {
    /// Allocate a new run context under `.conclave/runs/` in the current
    /// working directory.
    pub fn create() -> Self {
        let run_id = short_id();
        let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let run_dir = base.join(".conclave").join("runs").join(&run_id);
        Self { run_id, run_dir }
    }
}

/// First hyphen-delimited segment of a v4 UUID (8 hex chars)
fn short_id() -> String {
    let id = Uuid::new_v4().to_string();
    id.split('-').next().unwrap_or(&id).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_shape() {
        let id = short_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_run_dir_is_scoped_by_run_id() {
        let ctx = RunContext::create();
        assert!(ctx.run_dir.ends_with(PathBuf::from(".conclave/runs").join(&ctx.run_id)));
    }

    #[test]
    fn test_run_ids_are_unique_enough() {
        let a = RunContext::create();
        let b = RunContext::create();
        assert_ne!(a.run_id, b.run_id);
    }
}

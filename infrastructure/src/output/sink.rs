//! Filesystem output sink
//!
//! Writes one markdown artifact per (participant, round) pair under the
//! run directory, named `<participant>.<suffix?>.v<round>.md` with the
//! participant name lowercased. Concurrent writers within a round target
//! distinct paths; directory creation is idempotent.

use conclave_application::ports::output_sink::{OutputSink, SinkError};
use std::path::PathBuf;

use super::run_context::RunContext;

/// Output sink backed by a run-scoped directory
pub struct FsOutputSink {
    run_dir: PathBuf,
}

impl FsOutputSink {
    pub fn new(ctx: &RunContext) -> Self {
        Self {
            run_dir: ctx.run_dir.clone(),
        }
    }

    fn file_name(participant: &str, round: u32, suffix: Option<&str>) -> String {
        let suffix_part = suffix.map(|s| format!(".{s}")).unwrap_or_default();
        format!("{}{}.v{}.md", participant.to_lowercase(), suffix_part, round)
    }
}

impl OutputSink for FsOutputSink {
    fn write(
        &self,
        participant: &str,
        round: u32,
        suffix: Option<&str>,
        content: &str,
    ) -> Result<(), SinkError> {
        // lazy: the run directory appears on the first successful write
        std::fs::create_dir_all(&self.run_dir)?;

        let path = self.run_dir.join(Self::file_name(participant, round, suffix));
        std::fs::write(path, content)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.run_dir.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_in(dir: &std::path::Path) -> FsOutputSink {
        FsOutputSink {
            run_dir: dir.join("runs").join("abc123"),
        }
    }

    #[test]
    fn test_file_name_scheme() {
        assert_eq!(FsOutputSink::file_name("Anthropic", 1, None), "anthropic.v1.md");
        assert_eq!(
            FsOutputSink::file_name("Anthropic", 2, Some("synthesis")),
            "anthropic.synthesis.v2.md"
        );
    }

    #[test]
    fn test_directory_is_created_lazily() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = sink_in(tmp.path());

        assert!(!sink.run_dir.exists());
        sink.write("OpenAI", 1, None, "draft one").unwrap();
        assert!(sink.run_dir.exists());

        let written = std::fs::read_to_string(sink.run_dir.join("openai.v1.md")).unwrap();
        assert_eq!(written, "draft one");
    }

    #[test]
    fn test_synthesis_suffix_does_not_collide() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = sink_in(tmp.path());

        sink.write("Leader", 2, Some("synthesis"), "unified").unwrap();
        sink.write("Leader", 2, None, "plain").unwrap();

        assert!(sink.run_dir.join("leader.synthesis.v2.md").exists());
        assert!(sink.run_dir.join("leader.v2.md").exists());
    }

    #[test]
    fn test_location_points_at_run_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let sink = sink_in(tmp.path());
        assert!(sink.location().ends_with("abc123"));
    }
}

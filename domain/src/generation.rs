//! Generation outcomes
//!
//! A provider call never fails the round it belongs to: adapters normalize
//! every failure into a [`GenerationOutcome::Failure`], and the failed slot
//! is carried through history and persistence as `[Error] ...` text. The
//! structured variant exists so internal code can branch on the error kind
//! without re-parsing the sentinel string.

use serde::{Deserialize, Serialize};

/// Category of a normalized provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationErrorKind {
    /// Missing or rejected credentials
    Auth,
    /// Provider-side throttling
    RateLimit,
    /// Transport-level failure
    Network,
    /// Response arrived but could not be interpreted
    MalformedResponse,
    /// Anything else
    Other,
}

impl GenerationErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            GenerationErrorKind::Auth => "auth",
            GenerationErrorKind::RateLimit => "rate_limit",
            GenerationErrorKind::Network => "network",
            GenerationErrorKind::MalformedResponse => "malformed_response",
            GenerationErrorKind::Other => "other",
        }
    }
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a single provider generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationOutcome {
    /// The provider produced text
    Success { text: String },
    /// The provider failed; the round continues with a sentinel slot
    Failure {
        kind: GenerationErrorKind,
        message: String,
    },
}

impl GenerationOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        GenerationOutcome::Success { text: text.into() }
    }

    pub fn failure(kind: GenerationErrorKind, message: impl Into<String>) -> Self {
        GenerationOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success { .. })
    }

    /// Materialize the outcome as the text recorded into history and
    /// persisted to the output sink. Failures render with the legacy
    /// `[Error]` sentinel prefix.
    pub fn into_text(self) -> String {
        match self {
            GenerationOutcome::Success { text } => text,
            GenerationOutcome::Failure { message, .. } => format!("[Error] {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_into_text() {
        let outcome = GenerationOutcome::success("a plan");
        assert!(outcome.is_success());
        assert_eq!(outcome.into_text(), "a plan");
    }

    #[test]
    fn test_failure_renders_sentinel() {
        let outcome = GenerationOutcome::failure(
            GenerationErrorKind::RateLimit,
            "Anthropic failed to generate response: 429",
        );
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.into_text(),
            "[Error] Anthropic failed to generate response: 429"
        );
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(GenerationErrorKind::MalformedResponse.to_string(), "malformed_response");
    }
}

//! Provider error normalization

use conclave_domain::GenerationErrorKind;
use thiserror::Error;

/// Errors raised inside a provider adapter, before normalization into a
/// `GenerationOutcome`
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API key not configured (set {0})")]
    MissingApiKey(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Map the error onto the domain's failure categories.
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            ProviderError::MissingApiKey(_) => GenerationErrorKind::Auth,
            ProviderError::Http(e) if e.is_decode() => GenerationErrorKind::MalformedResponse,
            ProviderError::Http(_) => GenerationErrorKind::Network,
            ProviderError::Api { status, .. } => match status.as_u16() {
                401 | 403 => GenerationErrorKind::Auth,
                429 => GenerationErrorKind::RateLimit,
                _ => GenerationErrorKind::Other,
            },
            ProviderError::InvalidResponse(_) => GenerationErrorKind::MalformedResponse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_api_status_mapping() {
        let auth = ProviderError::Api {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        };
        assert_eq!(auth.kind(), GenerationErrorKind::Auth);

        let throttled = ProviderError::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: String::new(),
        };
        assert_eq!(throttled.kind(), GenerationErrorKind::RateLimit);

        let server = ProviderError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        };
        assert_eq!(server.kind(), GenerationErrorKind::Other);
    }

    #[test]
    fn test_missing_key_is_auth() {
        let error = ProviderError::MissingApiKey("ANTHROPIC_API_KEY".to_string());
        assert_eq!(error.kind(), GenerationErrorKind::Auth);
        assert!(error.to_string().contains("ANTHROPIC_API_KEY"));
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The endpoint does not serve this model (HTTP 404).
    #[error("API error (404): {body}")]
    UpstreamUnavailable { model: String, body: String },

    #[error("API error ({status}): {body}")]
    Upstream { model: String, status: u16, body: String },

    /// A success response whose body carried an `error` field.
    #[error("{message}")]
    UpstreamReported { model: String, message: String },

    #[error("Unexpected response format from {model}: {reason}")]
    MalformedResponse { model: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("All {attempts} candidate models failed; last error: {}", last_message(.failures))]
    ExhaustedCandidates {
        attempts: usize,
        failures: Vec<AttemptFailure>,
    },
}

/// One failed attempt against one candidate model.
#[derive(Debug)]
pub struct AttemptFailure {
    pub model: String,
    pub error: LLMError,
}

fn last_message(failures: &[AttemptFailure]) -> String {
    failures
        .last()
        .map(|f| f.error.to_string())
        .unwrap_or_else(|| "no attempts were made".to_string())
}

impl LLMError {
    /// The final attempt's error when every candidate failed.
    pub fn last_error(&self) -> Option<&LLMError> {
        match self {
            LLMError::ExhaustedCandidates { failures, .. } => failures.last().map(|f| &f.error),
            _ => None,
        }
    }

    /// Upstream HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            LLMError::UpstreamUnavailable { .. } => Some(404),
            LLMError::Upstream { status, .. } => Some(*status),
            LLMError::Http(e) => e.status().map(|s| s.as_u16()),
            LLMError::ExhaustedCandidates { .. } => self.last_error().and_then(LLMError::status),
            _ => None,
        }
    }
}

pub mod traits;
pub mod candidates;
pub mod response;
pub mod router;
pub mod inference;
pub mod tokens;
pub mod error;


use serde::{Serialize, Deserialize};
use serde_json::Value;
use tokens::TokenUsage;
use response::{ResponseShape, ShapeFailure};
use error::LLMError;

/// Token budget used when the caller does not pick one.
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Result of a text generation from an LLM.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GenerateResult {
    /// Empty when the upstream does not report usage.
    pub tokens: TokenUsage,
    pub generation: String,
    /// Model that produced the generation.
    pub model: String,
}

/// Result type for LLM operations.
pub type LLMResult<T> = std::result::Result<T, error::LLMError>;

/// Reject requests that would be pointless to send.
pub(crate) fn check_request(prompt: &str, max_tokens: u32) -> LLMResult<()> {
    if prompt.trim().is_empty() {
        return Err(LLMError::InvalidRequest("prompt must not be empty".into()));
    }
    if max_tokens == 0 {
        return Err(LLMError::InvalidRequest("max_tokens must be greater than zero".into()));
    }
    Ok(())
}

/// Turn an upstream success body into a generation for `model`.
pub(crate) fn decode_body(model: &str, raw: &str) -> LLMResult<GenerateResult> {
    let value: Value = serde_json::from_str(raw).map_err(|e| LLMError::MalformedResponse {
        model: model.to_string(),
        reason: format!("body is not valid JSON: {e}"),
    })?;

    let shape = ResponseShape::classify(value).map_err(|f| shape_error(model, f))?;
    let tokens = shape.usage().unwrap_or_default();
    let generation = shape.into_text().map_err(|f| shape_error(model, f))?;

    Ok(GenerateResult {
        tokens,
        generation,
        model: model.to_string(),
    })
}

fn shape_error(model: &str, failure: ShapeFailure) -> LLMError {
    match failure {
        ShapeFailure::Reported(message) => LLMError::UpstreamReported {
            model: model.to_string(),
            message,
        },
        ShapeFailure::Unrecognized(reason) => LLMError::MalformedResponse {
            model: model.to_string(),
            reason,
        },
    }
}

/// Map a non-success upstream status to an error carrying the body text.
pub(crate) fn status_error(model: &str, status: reqwest::StatusCode, body: String) -> LLMError {
    if status == reqwest::StatusCode::NOT_FOUND {
        LLMError::UpstreamUnavailable {
            model: model.to_string(),
            body,
        }
    } else {
        LLMError::Upstream {
            model: model.to_string(),
            status: status.as_u16(),
            body,
        }
    }
}

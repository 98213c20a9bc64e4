use futures::{FutureExt, future::BoxFuture};
use serde::Serialize;

use crate::config::{ConfigError, RouterConfig};
use crate::message::{self, Message};
use crate::llm::{
    traits::LLM,
    candidates::CandidateModels,
    error::{AttemptFailure, LLMError},
    GenerateResult,
    LLMResult,
    DEFAULT_MAX_TOKENS,
    check_request,
    decode_body,
    status_error,
};

/// Body of a chat-completion request.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Chat-completion client that walks an ordered list of candidate models
/// until one of them answers with usable text.
///
/// Every candidate gets exactly one attempt, strictly in order and without
/// delay between attempts. Any failure on a candidate that is not the last
/// moves on to the next one. The loop stops at the first success.
#[derive(Debug, Clone)]
pub struct RouterClient {
    http: reqwest::Client,
    config: RouterConfig,
}

impl RouterClient {
    /// Build a client. Fails before any network I/O when the key is missing.
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Build a client from `HUGGINGFACE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(RouterConfig::from_env()?)
    }

    pub fn candidates(&self) -> &CandidateModels {
        &self.config.candidates
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Generate text for a single prompt.
    ///
    /// The prompt is sent verbatim as the only user message.
    pub async fn generate_text(&self, prompt: &str, max_tokens: u32) -> LLMResult<String> {
        let messages = [Message::user(prompt)];
        self.complete(&messages, max_tokens)
            .await
            .map(|result| result.generation)
    }

    /// [`RouterClient::generate_text`] with the default token budget.
    pub async fn generate_text_default(&self, prompt: &str) -> LLMResult<String> {
        self.generate_text(prompt, DEFAULT_MAX_TOKENS).await
    }

    /// Run the fallback loop over the candidate list.
    pub async fn complete(&self, messages: &[Message], max_tokens: u32) -> LLMResult<GenerateResult> {
        check_request(&message::flatten(messages), max_tokens)?;

        let candidates = &self.config.candidates;
        let total = candidates.len();
        let mut failures: Vec<AttemptFailure> = Vec::new();

        for (index, model) in candidates.iter().enumerate() {
            tracing::info!(model, attempt = index + 1, total, "trying candidate model");

            match self.attempt(model, messages, max_tokens).await {
                Ok(result) => {
                    tracing::info!(model, attempt = index + 1, "candidate model answered");
                    return Ok(result);
                }
                Err(error) => {
                    if candidates.is_last(index) {
                        tracing::error!(model, %error, "last candidate model failed");
                    } else {
                        tracing::warn!(model, %error, "candidate model failed, trying next");
                    }
                    failures.push(AttemptFailure {
                        model: model.to_string(),
                        error,
                    });
                }
            }
        }

        Err(LLMError::ExhaustedCandidates {
            attempts: failures.len(),
            failures,
        })
    }

    async fn attempt(&self, model: &str, messages: &[Message], max_tokens: u32) -> LLMResult<GenerateResult> {
        let body = ChatRequest {
            model,
            messages,
            max_tokens: Some(max_tokens),
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(model, %status, body = %text, "upstream returned an error status");
            return Err(status_error(model, status, text));
        }

        decode_body(model, &text)
    }
}

impl LLM for RouterClient {
    fn generate<'a>(&'a self, messages: &'a [Message], max_tokens: u32) -> BoxFuture<'a, LLMResult<GenerateResult>> {
        self.complete(messages, max_tokens).boxed()
    }
}

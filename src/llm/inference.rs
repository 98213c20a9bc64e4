use futures::{FutureExt, future::BoxFuture};
use serde::Serialize;

use crate::config::{self, ConfigError};
use crate::message::{self, Message};
use crate::llm::{
    traits::LLM,
    GenerateResult,
    LLMResult,
    check_request,
    decode_body,
    status_error,
};

/// Default model name used when no model is specified.
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Sampling parameters of the text-generation API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub do_sample: bool,
    /// `false` so the output does not echo the prompt.
    pub return_full_text: bool,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: crate::llm::DEFAULT_MAX_TOKENS,
            temperature: 0.7,
            top_p: 0.9,
            do_sample: true,
            return_full_text: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceOptions {
    /// Block until a cold model is loaded instead of failing with 503.
    pub wait_for_model: bool,
}

#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerationParameters,
    pub options: InferenceOptions,
}

/// Client for the single-model text-generation API.
///
/// No fallback: one model, one request. The response body goes through the
/// same shape decoding as the router.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    parameters: GenerationParameters,
}

impl InferenceClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingConfig(format!("{} is not configured", config::API_KEY_ENV)));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            parameters: GenerationParameters::default(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(config::require_api_key(|key| std::env::var(key).ok())?)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_parameters(mut self, parameters: GenerationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model)
    }

    /// Generate text for `prompt`, capped at `max_tokens` new tokens.
    pub async fn generate_text(&self, prompt: &str, max_tokens: u32) -> LLMResult<String> {
        self.infer(prompt, max_tokens).await.map(|r| r.generation)
    }

    async fn infer(&self, prompt: &str, max_tokens: u32) -> LLMResult<GenerateResult> {
        check_request(prompt, max_tokens)?;
        tracing::info!(model = %self.model, prompt_len = prompt.len(), "calling text-generation API");

        let body = InferenceRequest {
            inputs: prompt,
            parameters: GenerationParameters {
                max_new_tokens: max_tokens,
                ..self.parameters.clone()
            },
            options: InferenceOptions { wait_for_model: true },
        };

        let response = self
            .http
            .post(self.url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            tracing::error!(model = %self.model, %status, body = %text, "text-generation API error");
            return Err(status_error(&self.model, status, text));
        }

        decode_body(&self.model, &text)
    }
}

impl LLM for InferenceClient {
    fn generate<'a>(&'a self, messages: &'a [Message], max_tokens: u32) -> BoxFuture<'a, LLMResult<GenerateResult>> {
        async move {
            let prompt = message::flatten(messages);
            self.infer(&prompt, max_tokens).await
        }
        .boxed()
    }
}

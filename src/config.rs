use std::env;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::llm::candidates::CandidateModels;

/// Environment variable holding the inference API key.
pub const API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";
/// Optional override for the chat-completion endpoint.
pub const ROUTER_URL_ENV: &str = "HUGGINGFACE_ROUTER_URL";
/// Optional comma-separated override for the candidate model list.
pub const MODELS_ENV: &str = "HUGGINGFACE_MODELS";
/// Optional per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "HUGGINGFACE_TIMEOUT_SECS";

pub const DEFAULT_ROUTER_URL: &str = "https://router.huggingface.co/v1/chat/completions";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}

/// Settings for [`crate::llm::router::RouterClient`].
#[derive(Clone)]
pub struct RouterConfig {
    pub api_key: String,
    pub endpoint: String,
    pub candidates: CandidateModels,
    /// No timeout is applied when `None`; a cold model load can take tens of seconds.
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("candidates", &self.candidates)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// On-disk shape of a router config document. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouterFile {
    api_key: Option<String>,
    endpoint: Option<String>,
    models: Option<Vec<String>>,
    timeout_secs: Option<u64>,
}

impl RouterConfig {
    /// Build a config with the default endpoint and candidate list.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ROUTER_URL.to_string(),
            candidates: CandidateModels::default(),
            request_timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_candidates(mut self, candidates: CandidateModels) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Read the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the config through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = require_api_key(&lookup)?;
        let mut config = Self::new(api_key);

        if let Some(endpoint) = non_blank(lookup(ROUTER_URL_ENV)) {
            config.endpoint = endpoint;
        }
        if let Some(models) = non_blank(lookup(MODELS_ENV)) {
            config.candidates = models.parse()?;
        }
        if let Some(raw) = non_blank(lookup(TIMEOUT_ENV)) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidConfig(format!("{TIMEOUT_ENV} must be a whole number of seconds, got {raw:?}"))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document. A missing `api_key` falls back to the environment.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Self::from_toml_with_lookup(raw, |key| env::var(key).ok())
    }

    fn from_toml_with_lookup<F>(raw: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: RouterFile =
            toml::from_str(raw).map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;

        let api_key = match non_blank(file.api_key) {
            Some(key) => key,
            None => require_api_key(&lookup)?,
        };
        let mut config = Self::new(api_key);
        if let Some(endpoint) = non_blank(file.endpoint) {
            config.endpoint = endpoint;
        }
        if let Some(models) = file.models {
            config.candidates = CandidateModels::new(models)?;
        }
        config.request_timeout = file.timeout_secs.map(Duration::from_secs);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingConfig(format!("{API_KEY_ENV} is not configured")));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("endpoint must not be empty".into()));
        }
        if self.candidates.is_empty() {
            return Err(ConfigError::InvalidConfig("at least one candidate model is required".into()));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidConfig(format!(
                "request timeout must be at least one second; unset {TIMEOUT_ENV} for no timeout"
            )));
        }
        Ok(())
    }
}

/// Fetch the API key, treating a blank value the same as an absent one.
pub fn require_api_key<F>(lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(lookup(API_KEY_ENV))
        .ok_or_else(|| ConfigError::MissingConfig(format!("{API_KEY_ENV} is not configured")))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

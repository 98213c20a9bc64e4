use std::str::FromStr;

use crate::config::ConfigError;

/// Models tried by the router, most preferred first.
///
/// Repeated entries are intentional: each occurrence is a separate attempt.
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "zai-org/GLM-5:novita",
    "meta-llama/Meta-Llama-3-8B-Instruct",
    "HuggingFaceH4/zephyr-7b-beta",
    "google/flan-t5-small",
    "HuggingFaceH4/zephyr-7b-beta",
    "tiiuae/falcon-7b-instruct",
    "mistralai/Mistral-7B-Instruct-v0.2",
    "Qwen/Qwen2.5-7B-Instruct",
    "openai/gpt-oss-120b",
    "deepseek-ai/DeepSeek-R1",
    "mistralai/Mistral-7B-Instruct-v0.3",
    "meta-llama/Llama-3.x",
    "Qwen/Qwen2.5-7B-Instruct:together",
];

/// Ordered fallback chain of model identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateModels(Vec<String>);

impl CandidateModels {
    /// Build a list, rejecting an empty list or blank identifiers.
    pub fn new<I, S>(models: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        for model in models {
            let model = model.into().trim().to_string();
            if model.is_empty() {
                return Err(ConfigError::InvalidConfig("candidate model id must not be blank".into()));
            }
            list.push(model);
        }
        if list.is_empty() {
            return Err(ConfigError::InvalidConfig("at least one candidate model is required".into()));
        }
        Ok(Self(list))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Whether `index` is the final attempt in the chain.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.0.len()
    }
}

impl Default for CandidateModels {
    fn default() -> Self {
        Self(DEFAULT_CANDIDATES.iter().map(|m| m.to_string()).collect())
    }
}

/// Parses a comma-separated list, e.g. `"a/one, b/two"`.
impl FromStr for CandidateModels {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(',').map(str::trim).filter(|m| !m.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_keeps_order_and_duplicates() {
        let models = CandidateModels::default();
        assert_eq!(models.len(), DEFAULT_CANDIDATES.len());
        assert_eq!(models.get(0), Some("zai-org/GLM-5:novita"));
        assert_eq!(models.get(2), models.get(4));
        assert!(models.is_last(DEFAULT_CANDIDATES.len() - 1));
        assert!(!models.is_last(0));
    }

    #[test]
    fn parses_comma_separated_list() {
        let models: CandidateModels = " a/one ,b/two,, c/three ".parse().unwrap();
        let ids: Vec<&str> = models.iter().collect();
        assert_eq!(ids, vec!["a/one", "b/two", "c/three"]);
    }

    #[test]
    fn rejects_empty_list() {
        assert!(CandidateModels::new(Vec::<String>::new()).is_err());
        assert!(" , ".parse::<CandidateModels>().is_err());
    }

    #[test]
    fn rejects_blank_identifier() {
        assert!(CandidateModels::new(["ok/model", "  "]).is_err());
    }
}

use crate::llm::error::LLMError;

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("This book has no chapters yet")]
    NoChapters,

    #[error("Not enough content to summarize")]
    NotEnoughContent,

    /// Shown to readers as-is.
    #[error("{0}")]
    Generation(#[from] LLMError),
}

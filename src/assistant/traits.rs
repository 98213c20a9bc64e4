use super::types::{AssistantResult, Book};

/// Reader-facing AI features for a single book.
#[async_trait::async_trait]
pub trait Assistant: Send + Sync {
    /// Summarize the opening of the book.
    async fn summarize(&self, book: &Book) -> AssistantResult<String>;

    /// Produce a numbered list of discussion questions.
    async fn discussion_questions(&self, book: &Book) -> AssistantResult<String>;
}

use std::sync::Arc;
use crate::llm::traits::LLM;
use crate::message::Message;


pub mod types;
pub mod error;
pub mod traits;
pub mod prompt;

use traits::Assistant;
use types::{AssistantResult, Book, BookAssistant};
use error::AssistantError;
use prompt::{clean_excerpt, questions_prompt, summary_prompt, MIN_EXCERPT_CHARS};

/// Token budget for book summaries.
pub const SUMMARY_TOKENS: u32 = 400;
/// Token budget for discussion questions.
pub const QUESTION_TOKENS: u32 = 350;


impl BookAssistant {
    /// Create an assistant over the given LLM with the default token budgets.
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self {
            llm,
            summary_tokens: SUMMARY_TOKENS,
            question_tokens: QUESTION_TOKENS,
        }
    }

    /// Change the token budgets used for summaries and questions.
    pub fn with_budgets(mut self, summary_tokens: u32, question_tokens: u32) -> Self {
        self.summary_tokens = summary_tokens;
        self.question_tokens = question_tokens;
        self
    }

    async fn ask(&self, prompt: String, max_tokens: u32) -> AssistantResult<String> {
        let msgs = [Message::user(prompt)];
        let res = self.llm.generate(&msgs, max_tokens).await?;
        Ok(res.generation)
    }
}


#[async_trait::async_trait]
impl Assistant for BookAssistant {
    async fn summarize(&self, book: &Book) -> AssistantResult<String> {
        tracing::info!(book_id = %book.id, "generating book summary");

        // only the opening chapter is summarized
        let first = book.chapters.first().ok_or(AssistantError::NoChapters)?;
        let excerpt = clean_excerpt(&first.content);
        if excerpt.chars().count() < MIN_EXCERPT_CHARS {
            return Err(AssistantError::NotEnoughContent);
        }

        let summary = self.ask(summary_prompt(book, &excerpt), self.summary_tokens).await?;
        tracing::info!(book_id = %book.id, "summary generated");
        Ok(summary)
    }

    async fn discussion_questions(&self, book: &Book) -> AssistantResult<String> {
        tracing::info!(book_id = %book.id, "generating discussion questions");

        let answer = self.ask(questions_prompt(book), self.question_tokens).await?;
        let answer = answer.trim();
        // the prompt already opened the list with "1."
        let questions = if answer.starts_with("1.") {
            answer.to_string()
        } else {
            format!("1. {answer}")
        };
        tracing::info!(book_id = %book.id, "questions generated");
        Ok(questions)
    }
}

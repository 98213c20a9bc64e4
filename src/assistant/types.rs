use crate::llm::traits::LLM;
use std::sync::Arc;
use super::error::AssistantError;
use serde::{Serialize, Deserialize};

/// A chapter as stored by the application's data store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Chapter body, usually HTML.
    pub content: String,
}

/// A book with its chapters in reading order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// Builds book prompts and sends them to an LLM.
pub struct BookAssistant {
    /// The LLM used for every generation.
    pub llm: Arc<dyn LLM>,

    /// Token budget for summaries.
    pub summary_tokens: u32,

    /// Token budget for discussion questions.
    pub question_tokens: u32,
}

pub type AssistantResult<T> = Result<T, AssistantError>;

pub use crate::assistant::{
    traits::Assistant,
    types::{Book, BookAssistant, Chapter},
    error::AssistantError,
};
pub use crate::config::{ConfigError, RouterConfig};
pub use crate::error::{Error, Result};
pub use crate::llm::{
    candidates::CandidateModels,
    error::LLMError,
    inference::InferenceClient,
    router::RouterClient,
    traits::{LLM, llm_to_arc_dyn},
    GenerateResult,
    DEFAULT_MAX_TOKENS,
};
pub use crate::message::Message;

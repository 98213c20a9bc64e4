use std::sync::Arc;
use crate::message::Message;
use crate::llm::{LLMResult, GenerateResult};
use futures::future::BoxFuture;

/// Convert a concrete L into an `Arc<dyn LLM + Send + Sync>`.
/// Convenience so callers can do `llm_to_arc_dyn(MyLlm::new(...))`.
pub fn llm_to_arc_dyn<L>(llm: L) -> Arc<dyn LLM + Send + Sync>
where
    L: 'static + LLM + Send + Sync,
{
    Arc::new(llm)
}

/// Core LLM trait. Uses BoxFuture with an explicit lifetime so implementations
/// can borrow the input `&[Message]` instead of cloning large prompts.
///
/// `async_trait` is not used here so the returned future can be tied to `'a`.
pub trait LLM: Send + Sync {
    /// Produce a generation of at most `max_tokens` tokens. The returned future may borrow from `messages`.
    fn generate<'a>(&'a self, messages: &'a [Message], max_tokens: u32) -> BoxFuture<'a, LLMResult<GenerateResult>>;
}

//! AI summaries and discussion questions for a book reader.
//!
//! The core is [`llm::router::RouterClient`], a chat-completion client that
//! tries an ordered list of candidate models until one answers.

pub mod llm;
pub mod assistant;
pub mod message;
pub mod config;
pub mod error;
pub mod prelude;

//! Completion service adapters implementing the `LlmGateway` port

pub mod openai;

pub use openai::{OpenAiGateway, OpenAiSession, ProviderConfig};

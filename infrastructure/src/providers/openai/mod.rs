//! OpenAI-compatible chat completions provider
//!
//! Talks to any server exposing `POST {base_url}/chat/completions`
//! (OpenAI, DeepInfra, vLLM, Ollama, ...). The API is stateless, so each
//! [`OpenAiSession`] keeps its own message history and resends it.

mod config;
mod gateway;
mod session;
mod types;

pub use config::ProviderConfig;
pub use gateway::OpenAiGateway;
pub use session::OpenAiSession;

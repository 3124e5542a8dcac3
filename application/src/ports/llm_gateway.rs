//! LLM Gateway port
//!
//! Defines the interface for communicating with the text completion service.

use async_trait::async_trait;
use persona_bias_domain::{Exchange, Model};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_) | GatewayError::Timeout | GatewayError::RequestFailed(_)
        )
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the
/// completion service. Implementations (adapters) live in the
/// infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new conversation bound to a system prompt
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;

    /// Create a conversation that already holds `history` as earlier
    /// user/assistant turns
    async fn create_session_with_history(
        &self,
        model: &Model,
        system_prompt: &str,
        history: &[Exchange],
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active conversation with the completion service.
///
/// Each `send` appends a user turn, returns the completion and keeps it as
/// an assistant turn, so a second `send` continues the same conversation.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}

//! OpenAI-compatible LLM session
//!
//! Manages conversation history locally since the API is stateless.

use super::config::ProviderConfig;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use persona_bias_application::ports::llm_gateway::{GatewayError, LlmSession};
use persona_bias_domain::{Exchange, Model};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub struct OpenAiSession {
    client: Client,
    config: Arc<ProviderConfig>,
    model: Model,
    /// System turn first, then alternating user/assistant turns
    messages: Mutex<Vec<ChatMessage>>,
}

impl OpenAiSession {
    pub(crate) fn new(
        client: Client,
        config: Arc<ProviderConfig>,
        model: Model,
        system_prompt: &str,
        history: &[Exchange],
    ) -> Self {
        let mut messages = Vec::with_capacity(1 + 2 * history.len());
        messages.push(ChatMessage::system(system_prompt));
        for exchange in history {
            messages.push(ChatMessage::user(exchange.question.as_str()));
            messages.push(ChatMessage::assistant(exchange.answer.as_str()));
        }

        Self {
            client,
            config,
            model,
            messages: Mutex::new(messages),
        }
    }

    /// Call the API with retries on transient errors
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let backoff = backoff_delay(attempt);
                debug!(attempt, ?backoff, "Retrying after error");
                tokio::time::sleep(backoff).await;
            }

            match self.complete_once(messages).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() => {
                    warn!(attempt, model = %self.model, "Retryable API error: {}", e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| GatewayError::Other("All retry attempts exhausted".to_string())))
    }

    async fn complete_once(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let body = ChatCompletionRequest {
            model: self.model.as_str(),
            messages,
            temperature: self.config.temperature,
        };

        let mut request = self.client.post(self.config.completions_url()).json(&body);
        if let Some(auth) = self.config.auth_header() {
            request = request.header("Authorization", auth);
        }

        debug!(model = %self.model, messages = messages.len(), "Calling chat completions");

        let response = request.send().await.map_err(convert_request_error)?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(convert_status(status, &text));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse response: {}", e)))?
            .into_text()
            .ok_or_else(|| GatewayError::InvalidResponse("No choices in response".to_string()))
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut messages = self.messages.lock().await;
        messages.push(ChatMessage::user(content));

        match self.complete(&messages).await {
            Ok(text) => {
                messages.push(ChatMessage::assistant(text.clone()));
                Ok(text)
            }
            Err(e) => {
                // Leave the history as it was before this turn
                messages.pop();
                Err(e)
            }
        }
    }
}

/// Delay before retry `attempt` (1-based): 500ms, 1s, 2s, ...
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(500 * 2u64.pow(attempt.saturating_sub(1)))
}

fn convert_request_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::Other(format!("Request error: {}", e))
    }
}

fn convert_status(status: StatusCode, body: &str) -> GatewayError {
    let message = format!("API error {}: {}", status, body);
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        GatewayError::RequestFailed(message)
    } else if status == StatusCode::NOT_FOUND {
        GatewayError::ModelNotAvailable(message)
    } else {
        GatewayError::Other(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::types::Role;

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(1), Duration::from_millis(500));
        assert_eq!(backoff_delay(2), Duration::from_millis(1000));
        assert_eq!(backoff_delay(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_status_classification() {
        assert!(convert_status(StatusCode::TOO_MANY_REQUESTS, "").is_transient());
        assert!(convert_status(StatusCode::BAD_GATEWAY, "").is_transient());
        assert!(!convert_status(StatusCode::UNAUTHORIZED, "bad key").is_transient());
        assert!(matches!(
            convert_status(StatusCode::NOT_FOUND, "no such model"),
            GatewayError::ModelNotAvailable(_)
        ));
    }

    #[tokio::test]
    async fn test_failed_send_keeps_history() {
        let config = Arc::new(ProviderConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_seconds: 2,
            max_retries: 0,
            ..Default::default()
        });
        let session = OpenAiSession::new(Client::new(), config, Model::default(), "system", &[]);

        let result = session.send("hello").await;

        assert!(result.is_err());
        assert_eq!(session.messages.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_history_is_replayed_after_system_prompt() {
        let history = [Exchange::new("Who did it?", "MAYBE")];
        let session = OpenAiSession::new(
            Client::new(),
            Arc::new(ProviderConfig::default()),
            Model::default(),
            "You are a reasoning agent tasked with making an accusation.",
            &history,
        );

        let messages = session.messages.lock().await;
        let roles: Vec<_> = messages.iter().map(|m| m.role.clone()).collect();
        assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant]);
        assert_eq!(messages[1].content, "Who did it?");
        assert_eq!(messages[2].content, "MAYBE");
    }
}

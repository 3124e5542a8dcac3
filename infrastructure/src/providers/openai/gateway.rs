//! OpenAI-compatible gateway implementation

use super::config::ProviderConfig;
use super::session::OpenAiSession;
use async_trait::async_trait;
use persona_bias_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use persona_bias_domain::{Exchange, Model};
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

/// Gateway to an OpenAI-compatible completion service.
///
/// Cheap to share: sessions reuse the same HTTP connection pool.
pub struct OpenAiGateway {
    client: Client,
    config: Arc<ProviderConfig>,
}

impl OpenAiGateway {
    pub fn new(config: ProviderConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "OpenAI-compatible gateway created"
        );

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Model from the provider settings
    pub fn default_model(&self) -> &Model {
        &self.config.model
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.create_session_with_history(model, system_prompt, &[])
            .await
    }

    async fn create_session_with_history(
        &self,
        model: &Model,
        system_prompt: &str,
        history: &[Exchange],
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            Arc::clone(&self.config),
            model.clone(),
            system_prompt,
            history,
        )))
    }
}

//! Resolved provider settings

use persona_bias_domain::Model;
use std::time::Duration;

/// Everything the gateway needs, resolved once at startup.
///
/// The API key is passed in explicitly; the adapter never reads
/// environment variables on its own.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API root, e.g. `http://localhost:8000/v1`
    pub base_url: String,
    /// Bearer token (empty for local servers)
    pub api_key: String,
    /// Model used when the caller does not pick one
    pub model: Model,
    pub timeout_seconds: u64,
    /// Retries on transient errors (so at most `max_retries + 1` attempts)
    pub max_retries: u32,
    pub temperature: Option<f32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/v1".to_string(),
            api_key: String::new(),
            model: Model::default(),
            timeout_seconds: 120,
            max_retries: 2,
            temperature: None,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// `Authorization` header value, if a key is configured
    pub fn auth_header(&self) -> Option<String> {
        if self.api_key.is_empty() {
            None
        } else {
            Some(format!("Bearer {}", self.api_key))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_strips_trailing_slash() {
        let config = ProviderConfig {
            base_url: "http://localhost:11434/v1/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_auth_header() {
        let mut config = ProviderConfig::default();
        assert!(config.auth_header().is_none());

        config.api_key = "sk-test".to_string();
        assert_eq!(config.auth_header().as_deref(), Some("Bearer sk-test"));
    }
}

//! Provider configuration from TOML (`[provider]` section)

use super::ConfigError;
use persona_bias_domain::Model;
use serde::{Deserialize, Serialize};

/// OpenAI-compatible completion service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// API root; `/chat/completions` is appended.
    pub base_url: String,
    /// Environment variable holding the API key (default: "API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`).
    pub api_key: Option<String>,
    /// Model used by both agents.
    pub model: String,
    pub timeout_seconds: u64,
    /// Retries on rate limits, server errors and connection failures.
    pub max_retries: u32,
    /// Sampling temperature; the server default when unset.
    pub temperature: Option<f32>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/v1".to_string(),
            api_key_env: "API_KEY".to_string(),
            api_key: None,
            model: Model::DEFAULT.to_string(),
            timeout_seconds: 120,
            max_retries: 2,
            temperature: None,
        }
    }
}

impl FileProviderConfig {
    /// The explicit key if set, else the value of `api_key_env`
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| Self::lookup_env(&self.api_key_env))
    }

    fn lookup_env(name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    pub fn model(&self) -> Result<Model, ConfigError> {
        Model::new(&self.model).map_err(ConfigError::InvalidModel)
    }
}

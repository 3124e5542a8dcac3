//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversion into runtime types happens in [`FileConfig::provider_config`]
//! and [`FileConfig::experiment_params`].

mod experiment;
mod provider;

pub use experiment::FileExperimentConfig;
pub use provider::FileProviderConfig;

use crate::providers::openai::ProviderConfig;
use persona_bias_application::ExperimentParams;
use persona_bias_domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("provider.model: {0}")]
    InvalidModel(#[source] DomainError),

    #[error("{field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion service settings
    pub provider: FileProviderConfig,
    /// Dataset and worker pool settings
    pub experiment: FileExperimentConfig,
}

impl FileConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provider.timeout_seconds",
                message: "cannot be 0".to_string(),
            });
        }
        if let Some(t) = self.provider.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(ConfigError::InvalidValue {
                field: "provider.temperature",
                message: format!("{} is outside 0.0..=2.0", t),
            });
        }
        if self.experiment.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "experiment.max_concurrency",
                message: "cannot be 0".to_string(),
            });
        }
        self.provider.model().map(|_| ())
    }

    /// Resolve the provider section, credential included
    pub fn provider_config(&self) -> Result<ProviderConfig, ConfigError> {
        self.validate()?;
        Ok(ProviderConfig {
            base_url: self.provider.base_url.clone(),
            api_key: self.provider.resolve_api_key().unwrap_or_default(),
            model: self.provider.model()?,
            timeout_seconds: self.provider.timeout_seconds,
            max_retries: self.provider.max_retries,
            temperature: self.provider.temperature,
        })
    }

    pub fn experiment_params(&self) -> ExperimentParams {
        ExperimentParams::default().with_max_concurrency(self.experiment.max_concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
base_url = "https://api.deepinfra.com/v1/openai"
api_key_env = "DEEPINFRA_TOKEN"
model = "meta-llama/Meta-Llama-3.1-8B-Instruct"
timeout_seconds = 60
max_retries = 4
temperature = 0.2

[experiment]
dataset = "data/final_dataset.json"
max_concurrency = 16
audit_log = "logs/bias_game.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.provider.api_key_env, "DEEPINFRA_TOKEN");
        assert_eq!(config.provider.max_retries, 4);
        assert_eq!(config.provider.temperature, Some(0.2));
        assert_eq!(
            config.experiment.dataset,
            Some(PathBuf::from("data/final_dataset.json"))
        );
        assert_eq!(config.experiment.max_concurrency, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[experiment]
max_concurrency = 2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.experiment.max_concurrency, 2);
        assert_eq!(config.provider, FileProviderConfig::default());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.experiment_params().max_concurrency, 8);
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = FileConfig::default();
        config.experiment.max_concurrency = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "experiment.max_concurrency",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_blank_model() {
        let mut config = FileConfig::default();
        config.provider.model = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        let mut config = FileConfig::default();
        config.provider.temperature = Some(3.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_config_uses_explicit_key() {
        let mut config = FileConfig::default();
        config.provider.api_key = Some("token-abc123".to_string());

        let provider = config.provider_config().unwrap();

        assert_eq!(provider.api_key, "token-abc123");
        assert_eq!(provider.base_url, config.provider.base_url);
    }
}

//! Infrastructure layer for persona-bias
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus dataset and configuration file loading.

pub mod config;
pub mod dataset;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig, FileExperimentConfig, FileProviderConfig};
pub use dataset::{DatasetError, ScenarioDataset};
pub use logging::JsonlAuditLogger;
pub use providers::{OpenAiGateway, OpenAiSession, ProviderConfig};

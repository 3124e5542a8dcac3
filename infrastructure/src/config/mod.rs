//! Configuration file loading for persona-bias
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PERSONA_BIAS_*` environment variables (`PERSONA_BIAS_PROVIDER__MODEL=...`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./persona-bias.toml`
//! 4. Global: `$XDG_CONFIG_HOME/persona-bias/config.toml`
//! 5. Default values
//!
//! Command line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{ConfigError, FileConfig, FileExperimentConfig, FileProviderConfig};
pub use loader::ConfigLoader;

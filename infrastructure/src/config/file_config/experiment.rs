//! Experiment configuration from TOML (`[experiment]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExperimentConfig {
    /// Scenario dataset; the CLI argument takes precedence.
    pub dataset: Option<PathBuf>,
    /// Scenarios running at the same time.
    pub max_concurrency: usize,
    /// JSONL audit log, appended to on every run.
    pub audit_log: Option<PathBuf>,
}

impl Default for FileExperimentConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            max_concurrency: 8,
            audit_log: Some(PathBuf::from("bias_game_log.jsonl")),
        }
    }
}

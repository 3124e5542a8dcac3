//! Experiment parameters: orchestration control.
//!
//! [`ExperimentParams`] groups the static parameters that control
//! [`RunExperimentUseCase`](crate::use_cases::run_experiment::RunExperimentUseCase).
//! The interrogation protocol itself (rounds, questions per suspect) is
//! fixed domain policy and is not configurable here.

use serde::{Deserialize, Serialize};

/// Experiment orchestration parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentParams {
    /// Maximum number of scenarios running at the same time.
    pub max_concurrency: usize,
    /// Run only the first `n` scenarios of the dataset.
    pub limit: Option<usize>,
}

impl Default for ExperimentParams {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            limit: None,
        }
    }
}

impl ExperimentParams {
    // ==================== Builder Methods ====================

    /// Set the worker pool size; values below 1 are raised to 1
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Number of scenarios that will actually be scheduled out of `available`
    pub fn scheduled(&self, available: usize) -> usize {
        self.limit.map_or(available, |n| n.min(available))
    }
}

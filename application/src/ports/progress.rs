//! Progress notification port
//!
//! Defines the interface for reporting progress during an experiment.

use persona_bias_domain::{BiasTally, ScenarioResult};

/// Callback for progress updates during an experiment
///
/// Implementations live in the presentation layer. Callbacks arrive in
/// completion order, which is not the dataset order.
pub trait ExperimentProgress: Send + Sync {
    /// Called once before any scenario starts
    fn on_experiment_start(&self, total_scenarios: usize);

    /// Called when a scenario finished its accusation step
    fn on_scenario_complete(&self, index: usize, result: &ScenarioResult);

    /// Called when a scenario run failed and was excluded from the tally
    fn on_scenario_failed(&self, index: usize, error: &str);

    /// Called once after every scenario finished or was skipped
    fn on_experiment_complete(&self, tally: &BiasTally);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ExperimentProgress for NoProgress {
    fn on_experiment_start(&self, _total_scenarios: usize) {}
    fn on_scenario_complete(&self, _index: usize, _result: &ScenarioResult) {}
    fn on_scenario_failed(&self, _index: usize, _error: &str) {}
    fn on_experiment_complete(&self, _tally: &BiasTally) {}
}

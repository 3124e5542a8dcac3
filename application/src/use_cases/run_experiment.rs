//! Run Experiment use case
//!
//! Runs every scenario of a dataset on a bounded worker pool and folds the
//! results into a [`BiasTally`]. A failing scenario is logged and counted as
//! failed; it never stops its siblings.

use crate::config::ExperimentParams;
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{ExperimentProgress, NoProgress};
use crate::use_cases::run_scenario::RunScenarioUseCase;
use persona_bias_domain::{BiasTally, Scenario, ScenarioResult, excerpt};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that prevent an experiment from starting
#[derive(Error, Debug)]
pub enum RunExperimentError {
    #[error("No scenarios to run")]
    NoScenarios,
}

/// Aggregate outcome of an experiment
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExperimentReport {
    pub tally: BiasTally,
    /// Scenarios scheduled (after applying the limit)
    pub scheduled: usize,
    /// Scenarios never started because the run was cancelled
    pub skipped: usize,
}

impl ExperimentReport {
    pub fn total_biased(&self) -> u64 {
        self.tally.biased
    }

    pub fn total_general(&self) -> u64 {
        self.tally.general
    }
}

enum TaskOutcome {
    Completed(ScenarioResult),
    Failed(String),
    Skipped,
}

/// Use case for running all scenarios of an experiment
pub struct RunExperimentUseCase<G: LlmGateway + 'static> {
    runner: Arc<RunScenarioUseCase<G>>,
    logger: Arc<dyn AuditLogger>,
    params: ExperimentParams,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> RunExperimentUseCase<G> {
    pub fn new(runner: RunScenarioUseCase<G>, params: ExperimentParams) -> Self {
        Self {
            runner: Arc::new(runner),
            logger: Arc::new(NoAuditLogger),
            params,
            cancellation_token: None,
        }
    }

    /// Logger for experiment-level events (scenario failures)
    pub fn with_logger(mut self, logger: Arc<dyn AuditLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Stop launching new scenarios once `token` is cancelled.
    ///
    /// Scenarios already past their permit run to completion.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &ExperimentParams {
        &self.params
    }

    /// Execute the experiment with default (no-op) progress
    pub async fn execute(
        &self,
        scenarios: Vec<Scenario>,
    ) -> Result<ExperimentReport, RunExperimentError> {
        self.execute_with_progress(scenarios, &NoProgress).await
    }

    /// Execute the experiment with progress callbacks
    pub async fn execute_with_progress(
        &self,
        scenarios: Vec<Scenario>,
        progress: &dyn ExperimentProgress,
    ) -> Result<ExperimentReport, RunExperimentError> {
        if scenarios.is_empty() {
            return Err(RunExperimentError::NoScenarios);
        }

        let scheduled = self.params.scheduled(scenarios.len());
        info!(
            "Starting experiment: {} scenarios, {} workers",
            scheduled, self.params.max_concurrency
        );
        progress.on_experiment_start(scheduled);

        let semaphore = Arc::new(Semaphore::new(self.params.max_concurrency));
        let mut join_set = JoinSet::new();

        for (index, scenario) in scenarios.into_iter().take(scheduled).enumerate() {
            let runner = Arc::clone(&self.runner);
            let semaphore = Arc::clone(&semaphore);
            let token = self.cancellation_token.clone();

            join_set.spawn(async move {
                let outcome = Self::run_one(runner, &semaphore, token, scenario.clone()).await;
                (index, scenario, outcome)
            });
        }

        let mut report = ExperimentReport {
            scheduled,
            ..Default::default()
        };

        // Completion order, not submission order; the tally is a plain sum.
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, scenario, TaskOutcome::Completed(result))) => {
                    report.tally.record(&scenario.group, &result);
                    progress.on_scenario_complete(index, &result);
                }
                Ok((index, scenario, TaskOutcome::Failed(error))) => {
                    warn!("Scenario {} failed: {}", index, error);
                    report.tally.record_failure();
                    self.logger.log(AuditEvent::new(
                        "scenario_failed",
                        json!({
                            "index": index,
                            "scenario": scenario.scenario,
                            "group": scenario.group,
                            "error": error,
                        }),
                    ));
                    progress.on_scenario_failed(index, &error);
                }
                Ok((_, _, TaskOutcome::Skipped)) => {
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    report.tally.record_failure();
                }
            }
        }

        if report.skipped > 0 {
            warn!("Experiment cancelled, {} scenarios skipped", report.skipped);
        }
        info!(
            "Experiment finished: biased={}, general={}, unresolved={}, failed={}",
            report.tally.biased, report.tally.general, report.tally.unresolved, report.tally.failed
        );
        progress.on_experiment_complete(&report.tally);

        Ok(report)
    }

    async fn run_one(
        runner: Arc<RunScenarioUseCase<G>>,
        semaphore: &Semaphore,
        token: Option<CancellationToken>,
        scenario: Scenario,
    ) -> TaskOutcome {
        let Ok(_permit) = semaphore.acquire().await else {
            return TaskOutcome::Skipped;
        };
        if token.as_ref().is_some_and(|t| t.is_cancelled()) {
            return TaskOutcome::Skipped;
        }

        info!("Running scenario: {}", excerpt(&scenario.scenario, 60));

        // Run on its own task so a panic is caught here, with the index known
        let run = tokio::spawn(async move { runner.execute(&scenario).await });
        match run.await {
            Ok(Ok(outcome)) => TaskOutcome::Completed(outcome.result),
            Ok(Err(e)) => TaskOutcome::Failed(e.to_string()),
            Err(e) => TaskOutcome::Failed(format!("scenario task aborted: {}", e)),
        }
    }
}

//! Application layer for persona-bias
//!
//! This crate contains the agents, use cases, and port definitions.
//! It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use agents::{PersonaAgent, ReasoningAgent};
pub use config::ExperimentParams;
pub use ports::{
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{ExperimentProgress, NoProgress},
};
pub use use_cases::run_experiment::{ExperimentReport, RunExperimentError, RunExperimentUseCase};
pub use use_cases::run_scenario::{RunScenarioError, RunScenarioUseCase, ScenarioOutcome};

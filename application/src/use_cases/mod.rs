//! Use cases
//!
//! Application-level operations that orchestrate the agents.

pub mod run_experiment;
pub mod run_scenario;

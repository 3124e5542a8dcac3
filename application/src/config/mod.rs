//! Application-level configuration.
//!
//! - [`ExperimentParams`]: worker pool size and scenario limit

pub mod experiment_params;

pub use experiment_params::ExperimentParams;

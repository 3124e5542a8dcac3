//! Bias tally domain

pub mod value_objects;

pub use value_objects::{BiasTally, GroupTally, ScenarioResult};

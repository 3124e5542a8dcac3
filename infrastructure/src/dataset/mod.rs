//! Scenario dataset loading

mod loader;

pub use loader::{DatasetError, ScenarioDataset};

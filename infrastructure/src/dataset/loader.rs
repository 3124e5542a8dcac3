//! JSON scenario dataset loader
//!
//! The dataset is a single JSON array of scenario objects:
//!
//! ```json
//! [
//!   {
//!     "scenario": "A charity fund went missing...",
//!     "question": "Who most likely took the money?",
//!     "group": "Black",
//!     "personas": {
//!       "Alice": { "ethnicity": "White", "backstory": "..." },
//!       "Bob": { "ethnicity": "Black", "backstory": "..." }
//!     }
//!   }
//! ]
//! ```
//!
//! The whole file is read and validated up front, so a malformed record
//! aborts the experiment before any scenario is run.

use persona_bias_domain::{DomainError, Scenario};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Scenario #{index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: DomainError,
    },

    #[error("Dataset {0} contains no scenarios")]
    Empty(PathBuf),
}

/// A validated, ordered list of scenarios
#[derive(Debug, Clone)]
pub struct ScenarioDataset {
    path: PathBuf,
    scenarios: Vec<Scenario>,
}

impl ScenarioDataset {
    /// Read, parse and validate the dataset at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref().to_path_buf();
        debug!("Loading dataset from {}", path.display());

        let content = fs::read_to_string(&path).map_err(|source| DatasetError::Io {
            path: path.clone(),
            source,
        })?;

        let scenarios = Self::parse(&content).map_err(|e| match e {
            ParseFailure::Json(source) => DatasetError::Parse {
                path: path.clone(),
                source,
            },
            ParseFailure::Invalid { index, source } => DatasetError::Invalid { index, source },
            ParseFailure::Empty => DatasetError::Empty(path.clone()),
        })?;

        info!(
            "Loaded {} scenarios from {}",
            scenarios.len(),
            path.display()
        );
        Ok(Self { path, scenarios })
    }

    fn parse(content: &str) -> Result<Vec<Scenario>, ParseFailure> {
        let scenarios: Vec<Scenario> = serde_json::from_str(content).map_err(ParseFailure::Json)?;
        if scenarios.is_empty() {
            return Err(ParseFailure::Empty);
        }
        for (index, scenario) in scenarios.iter().enumerate() {
            scenario
                .validate()
                .map_err(|source| ParseFailure::Invalid { index, source })?;
        }
        Ok(scenarios)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn into_scenarios(self) -> Vec<Scenario> {
        self.scenarios
    }
}

enum ParseFailure {
    Json(serde_json::Error),
    Invalid { index: usize, source: DomainError },
    Empty,
}

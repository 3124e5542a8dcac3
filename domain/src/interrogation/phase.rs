//! Scenario run phases

use serde::{Deserialize, Serialize};

/// Where a scenario run currently is in the protocol.
///
/// A run moves strictly forward:
/// `Init -> Interrogating(1..=3) -> Accusing -> Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "round", rename_all = "snake_case")]
pub enum ScenarioPhase {
    Init,
    Interrogating(usize),
    Accusing,
    Resolved,
}

impl ScenarioPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioPhase::Init => "init",
            ScenarioPhase::Interrogating(_) => "interrogating",
            ScenarioPhase::Accusing => "accusing",
            ScenarioPhase::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ScenarioPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioPhase::Interrogating(round) => write!(f, "interrogating (round {})", round),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

//! Accusation reply parsing.
//!
//! The reasoning agent is asked for a single letter but replies are free
//! text. These functions are pure: no I/O, just normalization and lookup.

use super::mapping::{AccusationMapping, Choice};
use crate::CHOICE_LETTERS;
use serde::{Deserialize, Serialize};

/// Normalize a raw accusation reply.
///
/// Trims surrounding whitespace, strips periods at either end and upper-cases
/// the rest, so `" b. "` becomes `"B"`.
pub fn normalize_choice(reply: &str) -> String {
    reply.trim().trim_matches('.').to_uppercase()
}

/// Whether a normalized reply is one of the five choice letters.
///
/// This checks the full `A..E` alphabet, not the letters actually mapped
/// for a scenario; a valid but unmapped letter resolves to nothing.
pub fn is_valid_choice(normalized: &str) -> bool {
    normalized.len() == 1 && CHOICE_LETTERS.contains(normalized)
}

/// Outcome of the accusation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Accusation {
    /// The reply named a persona of the scenario
    Resolved {
        letter: char,
        name: String,
        ethnicity: String,
    },
    /// The reply did not map to any persona, even after repair
    Unresolved { reply: String },
}

impl Accusation {
    /// Resolve a normalized reply against the scenario's mapping
    pub fn resolve(normalized: &str, mapping: &AccusationMapping) -> Self {
        match mapping.resolve(normalized) {
            Some(Choice {
                letter,
                name,
                ethnicity,
            }) => Accusation::Resolved {
                letter: *letter,
                name: name.clone(),
                ethnicity: ethnicity.clone(),
            },
            None => Accusation::Unresolved {
                reply: normalized.to_string(),
            },
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Accusation::Resolved { .. })
    }

    pub fn accused_ethnicity(&self) -> Option<&str> {
        match self {
            Accusation::Resolved { ethnicity, .. } => Some(ethnicity),
            Accusation::Unresolved { .. } => None,
        }
    }
}

//! Agent memories
//!
//! Both memories are append-only. Their order is replayed verbatim into the
//! next prompt, so entries are never reordered or removed.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A single question put to a persona and the persona's answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

impl Exchange {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Private memory of one persona: only the exchanges addressed to it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaMemory {
    exchanges: Vec<Exchange>,
}

impl PersonaMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a question/answer pair at the end of the memory
    pub fn record_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.exchanges.push(Exchange::new(question, answer));
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Render the memory as a transcript for prompting
    pub fn transcript(&self) -> String {
        if self.exchanges.is_empty() {
            return "(no previous questions)".to_string();
        }
        let mut out = String::new();
        for exchange in &self.exchanges {
            let _ = writeln!(out, "Q: {}", exchange.question);
            let _ = writeln!(out, "A: {}", exchange.answer);
        }
        out.trim_end().to_string()
    }
}

/// One entry in the reasoning agent's memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemoryEntry {
    /// Marks the start of an outer interrogation round (1-based)
    RoundMarker { round: usize },
    /// A question the reasoning agent asked and the suspect's answer
    Interrogation {
        suspect: String,
        ethnicity: String,
        question: String,
        answer: String,
    },
}

impl MemoryEntry {
    pub fn is_round_marker(&self) -> bool {
        matches!(self, MemoryEntry::RoundMarker { .. })
    }
}

impl std::fmt::Display for MemoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryEntry::RoundMarker { round } => write!(f, "Round {}:", round),
            MemoryEntry::Interrogation {
                suspect,
                ethnicity,
                question,
                answer,
            } => write!(
                f,
                "[{} : {}] Q: {} | A: {}",
                suspect, ethnicity, question, answer
            ),
        }
    }
}

/// Memory of the reasoning agent: round markers and every exchange, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasoningMemory {
    entries: Vec<MemoryEntry>,
}

impl ReasoningMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_round(&mut self, round: usize) {
        self.entries.push(MemoryEntry::RoundMarker { round });
    }

    pub fn record_interrogation(
        &mut self,
        suspect: impl Into<String>,
        ethnicity: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) {
        self.entries.push(MemoryEntry::Interrogation {
            suspect: suspect.into(),
            ethnicity: ethnicity.into(),
            question: question.into(),
            answer: answer.into(),
        });
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    pub fn round_markers(&self) -> usize {
        self.entries.iter().filter(|e| e.is_round_marker()).count()
    }

    pub fn interrogations(&self) -> usize {
        self.entries.len() - self.round_markers()
    }

    pub fn transcript(&self) -> String {
        if self.entries.is_empty() {
            return "(no questions asked yet)".to_string();
        }
        self.entries
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

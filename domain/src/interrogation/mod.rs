//! Interrogation domain
//!
//! The protocol is fixed: [`INTERROGATION_ROUNDS`] outer rounds, each visiting
//! every persona in roster order and asking it [`QUESTIONS_PER_SUSPECT`]
//! questions. A scenario with `k` personas therefore produces
//! `INTERROGATION_ROUNDS * QUESTIONS_PER_SUSPECT * k` exchanges.

pub mod memory;
pub mod phase;

pub use memory::{Exchange, MemoryEntry, PersonaMemory, ReasoningMemory};
pub use phase::ScenarioPhase;

/// Outer interrogation rounds before the accusation
pub const INTERROGATION_ROUNDS: usize = 3;

/// Questions asked to each persona within one outer round
pub const QUESTIONS_PER_SUSPECT: usize = 3;

/// Total exchanges a scenario with `persona_count` personas goes through
pub fn total_exchanges(persona_count: usize) -> usize {
    INTERROGATION_ROUNDS * QUESTIONS_PER_SUSPECT * persona_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_exchanges() {
        assert_eq!(total_exchanges(1), 9);
        assert_eq!(total_exchanges(5), 45);
    }
}

//! Scenario domain
//!
//! Scenario records are produced by an external dataset builder and loaded
//! as a whole before the experiment starts.

pub mod entities;

pub use entities::{Persona, PersonaRecord, Personas, Scenario};

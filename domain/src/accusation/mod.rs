//! Accusation domain
//!
//! After interrogation the reasoning agent picks one persona by letter.
//! [`AccusationMapping`] assigns the letters, [`Accusation`] is the outcome.

pub mod mapping;
pub mod parsing;

pub use mapping::{AccusationMapping, Choice};
pub use parsing::{Accusation, is_valid_choice, normalize_choice};

//! Choice letters for the final accusation

use crate::scenario::Personas;
use crate::CHOICE_LETTERS;
use serde::{Deserialize, Serialize};

/// One selectable persona in the accusation prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub letter: char,
    pub name: String,
    pub ethnicity: String,
}

/// Bijection from choice letters to personas.
///
/// Letters are assigned from [`CHOICE_LETTERS`] in roster order, so the same
/// roster always produces the same mapping. Letters beyond the roster size
/// are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccusationMapping {
    choices: Vec<Choice>,
}

impl AccusationMapping {
    /// Build the mapping; personas beyond the available letters are dropped
    pub fn from_personas(personas: &Personas) -> Self {
        let choices = CHOICE_LETTERS
            .chars()
            .zip(personas.iter())
            .map(|(letter, persona)| Choice {
                letter,
                name: persona.name.clone(),
                ethnicity: persona.ethnicity().to_string(),
            })
            .collect();
        Self { choices }
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Look up an already-normalized letter such as `"B"`
    pub fn resolve(&self, letter: &str) -> Option<&Choice> {
        let mut chars = letter.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        self.choices.iter().find(|choice| choice.letter == c)
    }
}

//! Scenario records as produced by the dataset builder

use crate::core::error::DomainError;
use crate::CHOICE_LETTERS;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Identity of one persona as stored in the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaRecord {
    pub ethnicity: String,
    pub backstory: String,
}

/// A named persona taking part in a scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub record: PersonaRecord,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        ethnicity: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record: PersonaRecord {
                ethnicity: ethnicity.into(),
                backstory: backstory.into(),
            },
        }
    }

    pub fn ethnicity(&self) -> &str {
        &self.record.ethnicity
    }

    pub fn backstory(&self) -> &str {
        &self.record.backstory
    }
}

/// Ordered persona roster.
///
/// Serialized as a JSON object keyed by persona name. Deserialization keeps
/// the document order, which decides both interrogation order and the
/// choice letter each persona receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Personas(Vec<Persona>);

impl Personas {
    pub fn new(personas: Vec<Persona>) -> Self {
        Self(personas)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Persona> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.0.iter().find(|p| p.name == name)
    }
}

impl FromIterator<Persona> for Personas {
    fn from_iter<I: IntoIterator<Item = Persona>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Personas {
    type Item = &'a Persona;
    type IntoIter = std::slice::Iter<'a, Persona>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Personas {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for persona in &self.0 {
            map.serialize_entry(&persona.name, &persona.record)?;
        }
        map.end()
    }
}

struct PersonasVisitor;

impl<'de> Visitor<'de> for PersonasVisitor {
    type Value = Personas;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of persona name to {ethnicity, backstory}")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut personas = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, record)) = access.next_entry::<String, PersonaRecord>()? {
            personas.push(Persona { name, record });
        }
        Ok(Personas(personas))
    }
}

impl<'de> Deserialize<'de> for Personas {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PersonasVisitor)
    }
}

/// One experiment scenario (immutable once loaded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario description shown to the reasoning agent
    pub scenario: String,
    /// Question the reasoning agent must answer by picking a persona
    pub question: String,
    /// Target group: the ethnicity whose selection counts as biased
    pub group: String,
    pub personas: Personas,
}

impl Scenario {
    /// Check the invariants the interrogation protocol relies on
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.scenario.trim().is_empty() {
            return Err(DomainError::EmptyField("scenario"));
        }
        if self.question.trim().is_empty() {
            return Err(DomainError::EmptyField("question"));
        }
        if self.personas.is_empty() {
            return Err(DomainError::NoPersonas);
        }
        if self.personas.len() > CHOICE_LETTERS.len() {
            return Err(DomainError::TooManyPersonas(self.personas.len()));
        }

        let mut seen = HashSet::new();
        for persona in &self.personas {
            if persona.name.trim().is_empty() {
                return Err(DomainError::EmptyPersonaName);
            }
            if !seen.insert(persona.name.as_str()) {
                return Err(DomainError::DuplicatePersona(persona.name.clone()));
            }
        }
        Ok(())
    }

    /// `"Name (Ethnicity: X)"` for every persona, in roster order
    pub fn suspect_descriptions(&self) -> Vec<String> {
        self.personas
            .iter()
            .map(|p| format!("{} (Ethnicity: {})", p.name, p.ethnicity()))
            .collect()
    }
}

//! Symptoms the user reports alongside an allergy.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Symptoms offered as toggles before free-text entry.
pub const COMMON_SYMPTOMS: [&str; 10] = [
    "Hives",
    "Swelling",
    "Difficulty breathing",
    "Nausea",
    "Vomiting",
    "Diarrhea",
    "Dizziness",
    "Rapid pulse",
    "Loss of consciousness",
    "Throat tightness",
];

/// Ordered list of distinct, non-blank symptoms.
///
/// Insertion order is kept because it is the order the user picked them
/// and the order they appear on the card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SymptomList(Vec<String>);

impl SymptomList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a symptom, trimmed. Returns `false` if it was already listed.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the symptom is blank
    pub fn add(&mut self, symptom: &str) -> Result<bool, ValidationError> {
        let trimmed = symptom.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("symptom"));
        }
        if self.contains(trimmed) {
            return Ok(false);
        }
        self.0.push(trimmed.to_string());
        Ok(true)
    }

    /// Removes a symptom. Returns `false` if it was not listed.
    pub fn remove(&mut self, symptom: &str) -> bool {
        let trimmed = symptom.trim();
        let before = self.0.len();
        self.0.retain(|s| s != trimmed);
        self.0.len() != before
    }

    /// Adds the symptom if absent, removes it otherwise.
    /// Returns whether it is listed afterwards.
    pub fn toggle(&mut self, symptom: &str) -> Result<bool, ValidationError> {
        if self.remove(symptom) {
            Ok(false)
        } else {
            self.add(symptom)
        }
    }

    pub fn contains(&self, symptom: &str) -> bool {
        let trimmed = symptom.trim();
        self.0.iter().any(|s| s == trimmed)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for SymptomList {
    type Error = ValidationError;

    /// Builds a list, dropping repeats after the first occurrence.
    fn try_from(symptoms: Vec<String>) -> Result<Self, Self::Error> {
        let mut list = SymptomList::new();
        for symptom in &symptoms {
            list.add(symptom)?;
        }
        Ok(list)
    }
}

impl From<SymptomList> for Vec<String> {
    fn from(list: SymptomList) -> Self {
        list.0
    }
}

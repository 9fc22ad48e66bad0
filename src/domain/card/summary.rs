//! Plain-text rendering of a card, used as translation input.

use serde::Serialize;

use super::aggregate::AllergyCard;
use crate::domain::questionnaire::SeverityLevel;

/// The parts of a card worth showing to restaurant staff or medics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub food_allergen: String,
    pub severity: SeverityLevel,
    pub description: String,
    pub symptoms: Vec<String>,
    pub emergency_medication: Option<String>,
}

impl CardSummary {
    pub fn from_card(card: &AllergyCard) -> Self {
        Self {
            food_allergen: card.food_allergen().as_str().to_string(),
            severity: card.severity_level(),
            description: card.severity_description().to_string(),
            symptoms: card.symptoms().as_slice().to_vec(),
            emergency_medication: card.emergency_medication().map(str::to_string),
        }
    }

    /// One fact per line. Symptom and medication lines are omitted when empty.
    pub fn render(&self) -> String {
        let mut lines = vec![
            format!("I am allergic to: {}", self.food_allergen),
            format!("Severity: {}", self.severity.human_readable()),
            format!("Description: {}", self.description),
        ];
        if !self.symptoms.is_empty() {
            lines.push(format!("Symptoms: {}", self.symptoms.join(", ")));
        }
        if let Some(medication) = &self.emergency_medication {
            lines.push(format!("Emergency medication needed: {}", medication));
        }
        lines.join("\n")
    }
}

impl From<&AllergyCard> for CardSummary {
    fn from(card: &AllergyCard) -> Self {
        Self::from_card(card)
    }
}

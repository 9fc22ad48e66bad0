//! AllergyCard aggregate.
//!
//! A card is created once, from a completed assessment, and never edited
//! afterwards. Deleting and re-assessing is how a user updates one.

use serde::{Deserialize, Serialize};

use super::allergen::FoodAllergen;
use super::language::LanguageCode;
use super::summary::CardSummary;
use super::symptoms::SymptomList;
use crate::domain::foundation::{CardId, Timestamp};
use crate::domain::questionnaire::{AnswerRecord, AssessmentResult, SeverityLevel};

/// A user's record of one food allergy.
///
/// # Invariants
///
/// - `severity_level` and `severity_description` come from the same
///   severity profile
/// - `questionnaire_responses` is non-empty and in answer order
/// - `emergency_medication` is trimmed and never blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllergyCard {
    id: CardId,
    food_allergen: FoodAllergen,
    questionnaire_responses: Vec<AnswerRecord>,
    severity_level: SeverityLevel,
    severity_description: String,
    #[serde(default)]
    symptoms: SymptomList,
    #[serde(default)]
    emergency_medication: Option<String>,
    #[serde(default)]
    original_language: LanguageCode,
    created_at: Timestamp,
}

impl AllergyCard {
    /// Creates a card from a finished assessment.
    pub fn new(
        food_allergen: FoodAllergen,
        assessment: AssessmentResult,
        symptoms: SymptomList,
        emergency_medication: Option<String>,
        original_language: LanguageCode,
    ) -> Self {
        Self {
            id: CardId::new(),
            food_allergen,
            questionnaire_responses: assessment.responses,
            severity_level: assessment.severity.level,
            severity_description: assessment.severity.description,
            symptoms,
            emergency_medication: emergency_medication
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            original_language,
            created_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn food_allergen(&self) -> &FoodAllergen {
        &self.food_allergen
    }

    pub fn questionnaire_responses(&self) -> &[AnswerRecord] {
        &self.questionnaire_responses
    }

    pub fn severity_level(&self) -> SeverityLevel {
        self.severity_level
    }

    pub fn severity_description(&self) -> &str {
        &self.severity_description
    }

    pub fn symptoms(&self) -> &SymptomList {
        &self.symptoms
    }

    pub fn emergency_medication(&self) -> Option<&str> {
        self.emergency_medication.as_deref()
    }

    pub fn original_language(&self) -> LanguageCode {
        self.original_language
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Severe and life-threatening cards.
    pub fn is_high_risk(&self) -> bool {
        self.severity_level.is_high_risk()
    }

    pub fn summary(&self) -> CardSummary {
        CardSummary::from_card(self)
    }
}

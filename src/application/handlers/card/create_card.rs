//! CreateCardHandler - Command handler for turning a finished assessment
//! into a stored allergy card.

use std::sync::Arc;

use tracing::info;

use crate::domain::card::{AllergyCard, CardError, FoodAllergen, LanguageCode, SymptomList};
use crate::domain::questionnaire::AssessmentResult;
use crate::ports::CardStore;

/// Command to create a new card.
#[derive(Debug, Clone)]
pub struct CreateCardCommand {
    pub allergen: String,
    pub assessment: AssessmentResult,
    pub symptoms: Vec<String>,
    pub emergency_medication: Option<String>,
    pub language: LanguageCode,
}

/// Handler for creating cards.
pub struct CreateCardHandler {
    store: Arc<dyn CardStore>,
}

impl CreateCardHandler {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: CreateCardCommand) -> Result<AllergyCard, CardError> {
        // 1. Validate inputs
        let allergen = FoodAllergen::try_new(&cmd.allergen)?;
        let symptoms = SymptomList::try_from(cmd.symptoms)?;
        if cmd.assessment.responses.is_empty() {
            return Err(CardError::validation(
                "assessment",
                "assessment has no recorded answers",
            ));
        }

        // 2. Build the aggregate
        let card = AllergyCard::new(
            allergen,
            cmd.assessment,
            symptoms,
            cmd.emergency_medication,
            cmd.language,
        );

        // 3. Persist
        self.store.save(&card).await?;

        info!(
            card_id = %card.id(),
            severity = %card.severity_level(),
            "Allergy card created"
        );
        Ok(card)
    }
}

//! DeleteCardHandler - Command handler for removing a card.

use std::sync::Arc;

use tracing::info;

use crate::domain::card::CardError;
use crate::domain::foundation::CardId;
use crate::ports::CardStore;

#[derive(Debug, Clone)]
pub struct DeleteCardCommand {
    pub card_id: CardId,
}

pub struct DeleteCardHandler {
    store: Arc<dyn CardStore>,
}

impl DeleteCardHandler {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: DeleteCardCommand) -> Result<(), CardError> {
        self.store.delete(&cmd.card_id).await?;
        info!(card_id = %cmd.card_id, "Allergy card deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryCardStore;
    use crate::domain::card::{AllergyCard, FoodAllergen, LanguageCode, SymptomList};
    use crate::domain::questionnaire::{AssessmentSession, StepOutcome};

    fn test_card() -> AllergyCard {
        let mut session = AssessmentSession::standard().unwrap();
        let StepOutcome::Done(result) = session.answer("Wheat", "Yes, no problems").unwrap()
        else {
            panic!("expected completion");
        };
        AllergyCard::new(
            FoodAllergen::try_new("Wheat").unwrap(),
            result,
            SymptomList::new(),
            None,
            LanguageCode::En,
        )
    }

    #[tokio::test]
    async fn deletes_existing_card() {
        let store = Arc::new(InMemoryCardStore::new());
        let card = test_card();
        store.save(&card).await.unwrap();
        let handler = DeleteCardHandler::new(store.clone());

        handler
            .handle(DeleteCardCommand { card_id: card.id() })
            .await
            .unwrap();

        assert_eq!(store.card_count().await, 0);
    }

    #[tokio::test]
    async fn deleting_missing_card_is_not_found() {
        let handler = DeleteCardHandler::new(Arc::new(InMemoryCardStore::new()));
        let card_id = CardId::new();

        let result = handler.handle(DeleteCardCommand { card_id }).await;

        assert_eq!(result, Err(CardError::NotFound(card_id)));
    }
}

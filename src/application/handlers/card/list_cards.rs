//! ListCardsHandler - Query handler for the card overview.

use std::sync::Arc;

use crate::domain::card::{AllergyCard, CardError};
use crate::ports::CardStore;

#[derive(Debug, Clone, Default)]
pub struct ListCardsQuery {
    /// Maximum number of cards to return; all when `None`.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ListCardsResult {
    /// Newest first.
    pub cards: Vec<AllergyCard>,
    /// Number of stored cards before `limit` was applied.
    pub total: usize,
    /// Severe and life-threatening cards among all stored ones.
    pub high_risk_count: usize,
}

pub struct ListCardsHandler {
    store: Arc<dyn CardStore>,
}

impl ListCardsHandler {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListCardsQuery) -> Result<ListCardsResult, CardError> {
        let mut cards = self.store.list_recent().await?;

        let total = cards.len();
        let high_risk_count = cards.iter().filter(|c| c.is_high_risk()).count();

        if let Some(limit) = query.limit {
            cards.truncate(limit);
        }

        Ok(ListCardsResult {
            cards,
            total,
            high_risk_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryCardStore;
    use crate::domain::card::{FoodAllergen, LanguageCode, SymptomList};
    use crate::domain::questionnaire::{AssessmentSession, StepOutcome};

    /// Answers "No" down the cross-contact chain until `no_count` answers,
    /// then "Yes". Zero gives mild, eight gives severe.
    fn card_with_depth(allergen: &str, no_count: usize) -> AllergyCard {
        let mut session = AssessmentSession::standard().unwrap();
        for _ in 0..no_count {
            let options = session.current_options().unwrap();
            let no = options[1];
            session.answer(allergen, no).unwrap();
        }
        let options = session.current_options().unwrap();
        let yes = options[0];
        let StepOutcome::Done(result) = session.answer(allergen, yes).unwrap() else {
            panic!("expected completion");
        };
        AllergyCard::new(
            FoodAllergen::try_new(allergen).unwrap(),
            result,
            SymptomList::new(),
            None,
            LanguageCode::En,
        )
    }

    async fn seeded_store() -> Arc<InMemoryCardStore> {
        let store = Arc::new(InMemoryCardStore::new());
        store.save(&card_with_depth("Milk", 0)).await.unwrap();
        store.save(&card_with_depth("Soy", 3)).await.unwrap();
        store.save(&card_with_depth("Peanuts", 7)).await.unwrap();
        store.save(&card_with_depth("Shellfish", 8)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn lists_all_cards_with_counts() {
        let handler = ListCardsHandler::new(seeded_store().await);

        let result = handler.handle(ListCardsQuery::default()).await.unwrap();

        assert_eq!(result.cards.len(), 4);
        assert_eq!(result.total, 4);
        assert_eq!(result.high_risk_count, 2);
    }

    #[tokio::test]
    async fn limit_truncates_but_keeps_totals() {
        let handler = ListCardsHandler::new(seeded_store().await);

        let result = handler
            .handle(ListCardsQuery { limit: Some(2) })
            .await
            .unwrap();

        assert_eq!(result.cards.len(), 2);
        assert_eq!(result.total, 4);
        assert_eq!(result.high_risk_count, 2);
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let handler = ListCardsHandler::new(Arc::new(InMemoryCardStore::new()));

        let result = handler.handle(ListCardsQuery::default()).await.unwrap();

        assert!(result.cards.is_empty());
        assert_eq!(result.high_risk_count, 0);
    }
}

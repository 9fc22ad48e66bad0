//! GetCardHandler - Query handler for a single card.

use std::sync::Arc;

use crate::domain::card::{AllergyCard, CardError};
use crate::domain::foundation::CardId;
use crate::ports::CardStore;

#[derive(Debug, Clone)]
pub struct GetCardQuery {
    pub card_id: CardId,
}

pub struct GetCardHandler {
    store: Arc<dyn CardStore>,
}

impl GetCardHandler {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetCardQuery) -> Result<AllergyCard, CardError> {
        self.store
            .find_by_id(&query.card_id)
            .await?
            .ok_or_else(|| CardError::not_found(query.card_id))
    }
}

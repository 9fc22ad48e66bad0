//! In-Memory Card Store Adapter
//!
//! Keeps cards in a process-local map. Used by tests and by the terminal
//! binary when no storage path is configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::card::AllergyCard;
use crate::domain::foundation::{CardId, DomainError};
use crate::ports::{card_not_found, CardStore};

#[derive(Debug, Clone)]
pub struct InMemoryCardStore {
    cards: Arc<RwLock<HashMap<CardId, AllergyCard>>>,
}

impl InMemoryCardStore {
    pub fn new() -> Self {
        Self {
            cards: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored cards (useful for tests)
    pub async fn clear(&self) {
        self.cards.write().await.clear();
    }

    pub async fn card_count(&self) -> usize {
        self.cards.read().await.len()
    }
}

impl Default for InMemoryCardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn save(&self, card: &AllergyCard) -> Result<(), DomainError> {
        let mut cards = self.cards.write().await;
        cards.insert(card.id(), card.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CardId) -> Result<Option<AllergyCard>, DomainError> {
        let cards = self.cards.read().await;
        Ok(cards.get(id).cloned())
    }

    async fn list_recent(&self) -> Result<Vec<AllergyCard>, DomainError> {
        let cards = self.cards.read().await;
        let mut all: Vec<AllergyCard> = cards.values().cloned().collect();
        all.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(all)
    }

    async fn delete(&self, id: &CardId) -> Result<(), DomainError> {
        let mut cards = self.cards.write().await;
        cards
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| card_not_found(id))
    }
}

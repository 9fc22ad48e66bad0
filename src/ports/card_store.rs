//! Card store port.
//!
//! Persists finished allergy cards. Questionnaire state is never stored;
//! only the completed card is.

use crate::domain::card::AllergyCard;
use crate::domain::foundation::{CardId, DomainError, ErrorCode};
use async_trait::async_trait;

#[async_trait]
pub trait CardStore: Send + Sync {
    /// Insert or replace a card.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, card: &AllergyCard) -> Result<(), DomainError>;

    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &CardId) -> Result<Option<AllergyCard>, DomainError>;

    /// All cards, newest first.
    async fn list_recent(&self) -> Result<Vec<AllergyCard>, DomainError>;

    /// # Errors
    ///
    /// - `CardNotFound` if the card doesn't exist
    /// - `StorageError` on persistence failure
    async fn delete(&self, id: &CardId) -> Result<(), DomainError>;
}

/// Error for a missing card, carrying its id as a detail.
pub fn card_not_found(id: &CardId) -> DomainError {
    DomainError::new(
        ErrorCode::CardNotFound,
        format!("Card not found: {}", id),
    )
    .with_detail("card_id", id.to_string())
}

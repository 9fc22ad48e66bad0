//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CardStore` - persistence for finished allergy cards
//! - `TranslationService` - renders a card summary in another language

mod card_store;
mod translation_service;

pub use card_store::{card_not_found, CardStore};
pub use translation_service::{TranslationError, TranslationRequest, TranslationService};

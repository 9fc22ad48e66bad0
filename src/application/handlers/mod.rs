//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod card;

pub use card::{
    CreateCardCommand, CreateCardHandler, DeleteCardCommand, DeleteCardHandler, GetCardHandler,
    GetCardQuery, ListCardsHandler, ListCardsQuery, ListCardsResult, TranslateCardCommand,
    TranslateCardHandler, TranslateCardResult,
};

//! Card command and query handlers.

mod create_card;
mod delete_card;
mod get_card;
mod list_cards;
mod translate_card;

pub use create_card::{CreateCardCommand, CreateCardHandler};
pub use delete_card::{DeleteCardCommand, DeleteCardHandler};
pub use get_card::{GetCardHandler, GetCardQuery};
pub use list_cards::{ListCardsHandler, ListCardsQuery, ListCardsResult};
pub use translate_card::{TranslateCardCommand, TranslateCardHandler, TranslateCardResult};

//! Card module - the allergy card a user shows to restaurant staff.
//!
//! A card bundles the allergen, the completed questionnaire, the resolved
//! severity and optional symptoms and medication.

mod aggregate;
mod allergen;
mod errors;
mod language;
mod summary;
mod symptoms;

pub use aggregate::AllergyCard;
pub use allergen::{FoodAllergen, COMMON_ALLERGENS, MAX_ALLERGEN_LENGTH};
pub use errors::CardError;
pub use language::LanguageCode;
pub use summary::CardSummary;
pub use symptoms::{SymptomList, COMMON_SYMPTOMS};

//! Food allergen value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Maximum length of an allergen name, in characters.
pub const MAX_ALLERGEN_LENGTH: usize = 100;

/// Allergens offered as quick picks before free-text entry.
pub const COMMON_ALLERGENS: [&str; 12] = [
    "Peanuts",
    "Tree nuts",
    "Milk",
    "Eggs",
    "Wheat",
    "Soy",
    "Fish",
    "Shellfish",
    "Sesame",
    "Corn",
    "Tomatoes",
    "Chocolate",
];

/// Name of the food a card is about, e.g. "Peanuts".
///
/// Stored trimmed. Used verbatim when substituting the question
/// placeholder, so no case normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FoodAllergen(String);

impl FoodAllergen {
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `OutOfRange` if longer than `MAX_ALLERGEN_LENGTH` characters
    pub fn try_new(name: &str) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("food_allergen"));
        }

        let length = trimmed.chars().count();
        if length > MAX_ALLERGEN_LENGTH {
            return Err(ValidationError::out_of_range(
                "food_allergen",
                1,
                MAX_ALLERGEN_LENGTH as i64,
                length as i64,
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this is one of the quick-pick allergens.
    pub fn is_common(&self) -> bool {
        COMMON_ALLERGENS.contains(&self.0.as_str())
    }
}

impl TryFrom<String> for FoodAllergen {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(&value)
    }
}

impl From<FoodAllergen> for String {
    fn from(allergen: FoodAllergen) -> Self {
        allergen.0
    }
}

impl fmt::Display for FoodAllergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(FoodAllergen::try_new("  Peanuts \n").unwrap().as_str(), "Peanuts");
    }

    #[test]
    fn rejects_blank_names() {
        assert!(matches!(
            FoodAllergen::try_new("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "x".repeat(MAX_ALLERGEN_LENGTH + 1);
        assert!(matches!(
            FoodAllergen::try_new(&long),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(FoodAllergen::try_new(&"x".repeat(MAX_ALLERGEN_LENGTH)).is_ok());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let name = "é".repeat(MAX_ALLERGEN_LENGTH);
        assert!(FoodAllergen::try_new(&name).is_ok());
    }

    #[test]
    fn common_allergens_are_flagged() {
        assert!(FoodAllergen::try_new("Sesame").unwrap().is_common());
        assert!(!FoodAllergen::try_new("Kiwi").unwrap().is_common());
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<FoodAllergen>("\"  \"").is_err());
        let parsed: FoodAllergen = serde_json::from_str("\" Milk \"").unwrap();
        assert_eq!(parsed.as_str(), "Milk");
    }
}

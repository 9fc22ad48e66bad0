//! Card-specific error types.

use crate::domain::foundation::{CardId, DomainError, ErrorCode, ValidationError};
use crate::domain::questionnaire::AssessmentError;
use crate::ports::TranslationError;

/// Errors surfaced by the card handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// Card was not found.
    NotFound(CardId),
    /// Input failed validation.
    ValidationFailed { field: String, message: String },
    /// The questionnaire rejected an operation.
    Assessment(AssessmentError),
    /// The translation service failed.
    Translation(TranslationError),
    /// Storage or other infrastructure failure.
    Infrastructure(String),
}

impl CardError {
    pub fn not_found(id: CardId) -> Self {
        CardError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CardError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CardError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CardError::NotFound(_) => ErrorCode::CardNotFound,
            CardError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CardError::Assessment(err) => err.code(),
            CardError::Translation(_) => ErrorCode::TranslationFailed,
            CardError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CardError::NotFound(id) => format!("Card not found: {}", id),
            CardError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CardError::Assessment(err) => format!("Assessment error: {}", err),
            CardError::Translation(err) => format!("Translation failed: {}", err),
            CardError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CardError {}

impl From<ValidationError> for CardError {
    fn from(err: ValidationError) -> Self {
        CardError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AssessmentError> for CardError {
    fn from(err: AssessmentError) -> Self {
        CardError::Assessment(err)
    }
}

impl From<TranslationError> for CardError {
    fn from(err: TranslationError) -> Self {
        CardError::Translation(err)
    }
}

impl From<DomainError> for CardError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::CardNotFound => {
                match err.details.get("card_id").and_then(|id| id.parse().ok()) {
                    Some(id) => CardError::NotFound(id),
                    None => CardError::Infrastructure(err.to_string()),
                }
            }
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => CardError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => CardError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::QuestionId;

    #[test]
    fn codes_map_per_variant() {
        assert_eq!(CardError::not_found(CardId::new()).code(), ErrorCode::CardNotFound);
        assert_eq!(CardError::validation("f", "m").code(), ErrorCode::ValidationFailed);
        assert_eq!(
            CardError::Translation(TranslationError::Timeout).code(),
            ErrorCode::TranslationFailed
        );
        assert_eq!(CardError::infrastructure("disk").code(), ErrorCode::StorageError);
    }

    #[test]
    fn assessment_code_passes_through() {
        let err = CardError::from(AssessmentError::InvalidOption {
            question: QuestionId::new(3).unwrap(),
            option: "x".into(),
        });
        assert_eq!(err.code(), ErrorCode::InvalidOption);
    }

    #[test]
    fn validation_error_keeps_field() {
        let err = CardError::from(ValidationError::empty_field("food_allergen"));
        assert!(matches!(
            err,
            CardError::ValidationFailed { ref field, .. } if field == "food_allergen"
        ));
    }

    #[test]
    fn domain_not_found_maps_back_to_card_id() {
        let id = CardId::new();
        let domain = DomainError::new(ErrorCode::CardNotFound, "missing")
            .with_detail("card_id", id.to_string());
        assert_eq!(CardError::from(domain), CardError::NotFound(id));
    }

    #[test]
    fn other_domain_errors_are_infrastructure() {
        let err = CardError::from(DomainError::storage("disk full"));
        assert!(matches!(err, CardError::Infrastructure(_)));
    }
}

//! TranslateCardHandler - renders a stored card in another language.
//!
//! Translations are not persisted; the user shows them on screen and asks
//! again when needed.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::card::{CardError, LanguageCode};
use crate::domain::foundation::CardId;
use crate::ports::{CardStore, TranslationRequest, TranslationService};

#[derive(Debug, Clone)]
pub struct TranslateCardCommand {
    pub card_id: CardId,
    pub target: LanguageCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCardResult {
    pub card_id: CardId,
    pub language: LanguageCode,
    /// Untranslated summary, kept for side-by-side display.
    pub original: String,
    pub translated: String,
}

pub struct TranslateCardHandler {
    store: Arc<dyn CardStore>,
    translator: Arc<dyn TranslationService>,
}

impl TranslateCardHandler {
    pub fn new(store: Arc<dyn CardStore>, translator: Arc<dyn TranslationService>) -> Self {
        Self { store, translator }
    }

    pub async fn handle(
        &self,
        cmd: TranslateCardCommand,
    ) -> Result<TranslateCardResult, CardError> {
        // 1. Load the card
        let card = self
            .store
            .find_by_id(&cmd.card_id)
            .await?
            .ok_or_else(|| CardError::not_found(cmd.card_id))?;

        // 2. Build the translation input
        let summary = card.summary();
        let original = summary.render();

        // 3. Translate
        let translated = self
            .translator
            .translate(TranslationRequest::new(summary, cmd.target))
            .await
            .map_err(|err| {
                warn!(
                    card_id = %cmd.card_id,
                    target = %cmd.target,
                    error = %err,
                    "Translation failed"
                );
                CardError::Translation(err)
            })?;

        info!(card_id = %cmd.card_id, target = %cmd.target, "Card translated");

        Ok(TranslateCardResult {
            card_id: cmd.card_id,
            language: cmd.target,
            original,
            translated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryCardStore;
    use crate::adapters::translation::MockTranslationService;
    use crate::domain::card::{AllergyCard, FoodAllergen, SymptomList};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::questionnaire::{AssessmentSession, StepOutcome};
    use crate::ports::TranslationError;

    fn test_card() -> AllergyCard {
        let mut session = AssessmentSession::standard().unwrap();
        let StepOutcome::Done(result) = session.answer("Sesame", "Yes, no problems").unwrap()
        else {
            panic!("expected completion");
        };
        let mut symptoms = SymptomList::new();
        symptoms.add("Hives").unwrap();
        AllergyCard::new(
            FoodAllergen::try_new("Sesame").unwrap(),
            result,
            symptoms,
            None,
            LanguageCode::En,
        )
    }

    async fn setup(
        translator: MockTranslationService,
    ) -> (TranslateCardHandler, AllergyCard, MockTranslationService) {
        let store = Arc::new(InMemoryCardStore::new());
        let card = test_card();
        store.save(&card).await.unwrap();
        let handler = TranslateCardHandler::new(store, Arc::new(translator.clone()));
        (handler, card, translator)
    }

    #[tokio::test]
    async fn translates_card_summary() {
        let (handler, card, translator) =
            setup(MockTranslationService::new().with_translation("Je suis allergique")).await;

        let result = handler
            .handle(TranslateCardCommand {
                card_id: card.id(),
                target: LanguageCode::Fr,
            })
            .await
            .unwrap();

        assert_eq!(result.translated, "Je suis allergique");
        assert_eq!(result.language, LanguageCode::Fr);
        assert_eq!(result.original, card.summary().render());

        let calls = translator.get_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].target, LanguageCode::Fr);
        assert_eq!(calls[0].summary.symptoms, vec!["Hives".to_string()]);
    }

    #[tokio::test]
    async fn missing_card_skips_translation() {
        let (handler, _card, translator) = setup(MockTranslationService::new()).await;
        let card_id = CardId::new();

        let result = handler
            .handle(TranslateCardCommand {
                card_id,
                target: LanguageCode::Es,
            })
            .await;

        assert_eq!(result, Err(CardError::NotFound(card_id)));
        assert_eq!(translator.call_count(), 0);
    }

    #[tokio::test]
    async fn service_failure_surfaces_as_translation_error() {
        let (handler, card, _translator) = setup(
            MockTranslationService::new().with_error(TranslationError::AuthenticationFailed),
        )
        .await;

        let err = handler
            .handle(TranslateCardCommand {
                card_id: card.id(),
                target: LanguageCode::Ja,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CardError::Translation(TranslationError::AuthenticationFailed));
        assert_eq!(err.code(), ErrorCode::TranslationFailed);
    }
}

//! Mock Translation Service for testing.
//!
//! Returns queued translations or errors in order and records every
//! request it receives.
//!
//! # Example
//!
//! ```ignore
//! let service = MockTranslationService::new()
//!     .with_translation("Soy alérgico a: Cacahuetes")
//!     .with_error(TranslationError::Timeout);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::{TranslationError, TranslationRequest, TranslationService};

#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Error(TranslationError),
}

/// Mock translation service.
#[derive(Debug, Clone, Default)]
pub struct MockTranslationService {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<TranslationRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTranslationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful translation to the queue.
    pub fn with_translation(self, text: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success(text.into()));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: TranslationError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<TranslationRequest> {
        lock(&self.calls).clone()
    }

    /// Next queued response, or an echo of the rendered summary tagged
    /// with the target language when the queue is empty.
    fn next_response(&self, request: &TranslationRequest) -> MockResponse {
        lock(&self.responses).pop_front().unwrap_or_else(|| {
            MockResponse::Success(format!(
                "[{}] {}",
                request.target.code(),
                request.summary.render()
            ))
        })
    }
}

#[async_trait]
impl TranslationService for MockTranslationService {
    async fn translate(&self, request: TranslationRequest) -> Result<String, TranslationError> {
        let response = self.next_response(&request);
        lock(&self.calls).push(request);

        match response {
            MockResponse::Success(text) => Ok(text),
            MockResponse::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{CardSummary, LanguageCode};
    use crate::domain::questionnaire::SeverityLevel;

    fn request(target: LanguageCode) -> TranslationRequest {
        TranslationRequest::new(
            CardSummary {
                food_allergen: "Peanuts".into(),
                severity: SeverityLevel::Severe,
                description: "Avoid.".into(),
                symptoms: vec![],
                emergency_medication: None,
            },
            target,
        )
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let service = MockTranslationService::new()
            .with_translation("first")
            .with_error(TranslationError::Timeout);

        assert_eq!(service.translate(request(LanguageCode::Es)).await.unwrap(), "first");
        assert_eq!(
            service.translate(request(LanguageCode::Es)).await,
            Err(TranslationError::Timeout)
        );
    }

    #[tokio::test]
    async fn falls_back_to_tagged_echo() {
        let service = MockTranslationService::new();
        let text = service.translate(request(LanguageCode::Fr)).await.unwrap();
        assert!(text.starts_with("[fr] I am allergic to: Peanuts"));
    }

    #[tokio::test]
    async fn records_calls() {
        let service = MockTranslationService::new();
        service.translate(request(LanguageCode::De)).await.unwrap();
        service.translate(request(LanguageCode::Ko)).await.unwrap();

        assert_eq!(service.call_count(), 2);
        assert_eq!(service.get_calls()[1].target, LanguageCode::Ko);
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let service = MockTranslationService::new().with_translation("shared");
        let clone = service.clone();

        assert_eq!(clone.translate(request(LanguageCode::It)).await.unwrap(), "shared");
        assert_eq!(service.call_count(), 1);
    }
}

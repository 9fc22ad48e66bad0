//! Translation Service Port - turns a card summary into another language.
//!
//! The only implementation that talks to the network is an LLM-backed
//! adapter, so the error set mirrors the usual LLM failure modes.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::card::{CardSummary, LanguageCode};

#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Translate the summary into the requested language.
    ///
    /// Returns the translated text as produced by the service.
    async fn translate(&self, request: TranslationRequest) -> Result<String, TranslationError>;
}

/// What to translate and into which language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub summary: CardSummary,
    pub target: LanguageCode,
}

impl TranslationRequest {
    pub fn new(summary: CardSummary, target: LanguageCode) -> Self {
        Self { summary, target }
    }

    /// Full instruction text sent to the model.
    pub fn prompt(&self) -> String {
        format!(
            "Translate this allergy information to {}. \
             Make it clear, medically accurate, and suitable for showing to \
             restaurant staff or medical personnel:\n\n{}\n\n\
             Please provide a clear, professional translation that can be \
             easily understood by local people.",
            self.target.english_name(),
            self.summary.render()
        )
    }
}

/// Translation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("translation service unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider answered but with no text.
    #[error("translation service returned no text")]
    EmptyResponse,
}

impl TranslationError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TranslationError::RateLimited { .. }
                | TranslationError::Unavailable { .. }
                | TranslationError::Network(_)
                | TranslationError::Timeout
        )
    }
}

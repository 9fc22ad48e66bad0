//! Translation Adapters
//!
//! - **HttpTranslationService** - OpenAI-compatible chat completions endpoint
//! - **MockTranslationService** - Queued responses for tests and offline use

mod http_translation;
mod mock_translation;

pub use http_translation::{
    HttpTranslationConfig, HttpTranslationService, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use mock_translation::MockTranslationService;

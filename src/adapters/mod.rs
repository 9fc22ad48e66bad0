//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Card persistence (in-memory, YAML files)
//! - `translation` - Card translation (HTTP chat completions, mock)

pub mod storage;
pub mod translation;

pub use storage::{FileCardStore, InMemoryCardStore};
pub use translation::{HttpTranslationConfig, HttpTranslationService, MockTranslationService};

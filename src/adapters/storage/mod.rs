//! Storage Adapters
//!
//! Implementations of the CardStore port.
//!
//! ## Available Adapters
//!
//! - **FileCardStore** - One YAML file per card on disk
//! - **InMemoryCardStore** - Process-local map (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileCardStore, InMemoryCardStore};
//!
//! let store = FileCardStore::new("./data/cards");
//! let store = InMemoryCardStore::new();
//! ```

mod file_card_store;
mod in_memory_card_store;

pub use file_card_store::FileCardStore;
pub use in_memory_card_store::InMemoryCardStore;

//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `questionnaire` - Decision graph, traversal and severity assessment
//! - `card` - Allergy card aggregate and its value objects

pub mod card;
pub mod foundation;
pub mod questionnaire;

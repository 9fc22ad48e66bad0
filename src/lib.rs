//! Allergy Card - food allergy severity assessment and translatable
//! allergy cards.
//!
//! A fixed decision tree of yes/no and multiple-choice questions classifies
//! an allergy into one of four severity tiers. The result, together with
//! the user's symptoms and emergency medication, becomes an allergy card
//! that can be translated for restaurant staff or medical personnel.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

//! Questionnaire module - the allergy severity decision graph and its traversal.
//!
//! The graph is authored data: numbered questions whose answers lead either
//! to another question or to a terminal severity tag. It is validated once
//! when loaded and read-only afterwards, so any number of concurrent
//! `AssessmentSession`s may share it.

mod definition;
mod errors;
mod graph;
mod node;
mod progress;
mod session;
mod severity;
mod standard;
mod traversal;

pub use definition::{
    BranchTable, BranchTarget, GraphDefinition, QuestionDefinition, DEFAULT_PLACEHOLDER,
};
pub use errors::{AssessmentError, GraphError};
pub use graph::DecisionGraph;
pub use node::{AnswerOption, QuestionId, QuestionNode, TerminalLabel, Transition};
pub use progress::{Progress, DISPLAY_TOTAL};
pub use session::{AnswerRecord, AssessmentResult, AssessmentSession, AssessmentState, StepOutcome};
pub use severity::{SeverityLevel, SeverityProfile, SeverityResolver};
pub use standard::standard_graph;
pub use traversal::{NextStep, TraversalEngine};

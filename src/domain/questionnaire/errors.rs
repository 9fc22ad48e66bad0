//! Questionnaire error types.
//!
//! `AssessmentError` covers caller-contract violations at traversal time.
//! `GraphError` covers inconsistencies found while loading a decision graph;
//! those are fatal at startup.

use thiserror::Error;

use super::node::{QuestionId, TerminalLabel};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Caller-contract violations raised while running an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("option '{option}' is not offered by question {question}")]
    InvalidOption { question: QuestionId, option: String },

    #[error("question {0} does not exist in the decision graph")]
    UnknownNode(QuestionId),

    #[error("no severity profile registered for {0}")]
    UnknownTerminal(TerminalLabel),

    #[error("assessment already completed")]
    SessionCompleted,
}

impl AssessmentError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::InvalidOption { .. } => ErrorCode::InvalidOption,
            AssessmentError::UnknownNode(_) => ErrorCode::UnknownNode,
            AssessmentError::UnknownTerminal(_) => ErrorCode::UnknownTerminal,
            AssessmentError::SessionCompleted => ErrorCode::SessionCompleted,
        }
    }
}

impl From<AssessmentError> for DomainError {
    fn from(err: AssessmentError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Inconsistencies detected while loading a decision graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("malformed question data: {0}")]
    Malformed(String),

    #[error("question id must be positive")]
    InvalidQuestionId,

    #[error("decision graph has no questions")]
    Empty,

    #[error("question {0} is defined more than once")]
    DuplicateQuestion(QuestionId),

    #[error("root question {0} is not defined")]
    MissingRoot(QuestionId),

    #[error("question {0} offers no options")]
    NoOptions(QuestionId),

    #[error("question {question} offers '{option}' more than once")]
    DuplicateOption { question: QuestionId, option: String },

    #[error("question {question} has no destination for option '{option}'")]
    MissingTransition { question: QuestionId, option: String },

    #[error("question {question} has a branch for '{option}', which it does not offer")]
    OrphanTransition { question: QuestionId, option: String },

    #[error("question {question} branches to unknown terminal '{tag}'")]
    UnknownTerminal { question: QuestionId, tag: String },

    #[error("question {question} option '{option}' leads to undefined question {target}")]
    DanglingTarget {
        question: QuestionId,
        option: String,
        target: QuestionId,
    },

    #[error("question {0} cannot be reached from the root")]
    Unreachable(QuestionId),

    #[error("question {0} is part of a cycle")]
    Cycle(QuestionId),

    #[error("terminal {0} is reachable but has no severity profile")]
    UncoveredTerminal(TerminalLabel),
}

impl From<GraphError> for DomainError {
    fn from(err: GraphError) -> Self {
        DomainError::new(ErrorCode::GraphInconsistent, err.to_string())
    }
}

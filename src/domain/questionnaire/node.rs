//! Question nodes, terminal labels and the transitions between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::GraphError;
use crate::domain::foundation::ValidationError;

/// Identifier of a question in the decision graph. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct QuestionId(u16);

impl QuestionId {
    /// Creates a question id, rejecting zero.
    pub fn new(value: u16) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range(
                "question_id",
                1,
                i64::from(u16::MAX),
                0,
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for QuestionId {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestionId> for u16 {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome tier at which a traversal stops.
///
/// Authored in the question data as `END_MILD`, `END_MODERATE`,
/// `END_SEVERE` and `END_LIFE_THREATENING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TerminalLabel {
    #[serde(rename = "END_MILD")]
    Mild,
    #[serde(rename = "END_MODERATE")]
    Moderate,
    #[serde(rename = "END_SEVERE")]
    Severe,
    #[serde(rename = "END_LIFE_THREATENING")]
    LifeThreatening,
}

impl TerminalLabel {
    /// Prefix every terminal tag carries in the authored data.
    pub const TAG_PREFIX: &'static str = "END_";

    /// All terminal labels, mildest first.
    pub const ALL: [TerminalLabel; 4] = [
        TerminalLabel::Mild,
        TerminalLabel::Moderate,
        TerminalLabel::Severe,
        TerminalLabel::LifeThreatening,
    ];

    /// Tag as written in the question data.
    pub fn tag(&self) -> &'static str {
        match self {
            TerminalLabel::Mild => "END_MILD",
            TerminalLabel::Moderate => "END_MODERATE",
            TerminalLabel::Severe => "END_SEVERE",
            TerminalLabel::LifeThreatening => "END_LIFE_THREATENING",
        }
    }
}

impl fmt::Display for TerminalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TerminalLabel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerminalLabel::ALL
            .into_iter()
            .find(|label| label.tag() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "terminal_label",
                    format!("'{}' is not a known terminal tag", s),
                )
            })
    }
}

/// Where an answer leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Ask another question.
    Next(QuestionId),
    /// Stop with an outcome.
    Terminal(TerminalLabel),
}

/// One offered answer together with its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    label: String,
    transition: Transition,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, transition: Transition) -> Self {
        Self {
            label: label.into(),
            transition,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }
}

/// A single question in the decision graph.
///
/// # Invariants
///
/// - at least one option
/// - option labels are distinct
/// - every option carries exactly one transition (structural)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionNode {
    id: QuestionId,
    prompt: String,
    options: Vec<AnswerOption>,
}

impl QuestionNode {
    /// Builds a node, checking that it offers distinct, non-empty options.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Result<Self, GraphError> {
        if options.is_empty() {
            return Err(GraphError::NoOptions(id));
        }
        for (idx, option) in options.iter().enumerate() {
            if options[..idx].iter().any(|o| o.label == option.label) {
                return Err(GraphError::DuplicateOption {
                    question: id,
                    option: option.label.clone(),
                });
            }
        }
        Ok(Self {
            id,
            prompt: prompt.into(),
            options,
        })
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Prompt with every occurrence of `placeholder` replaced by `allergen`.
    pub fn render_prompt(&self, placeholder: &str, allergen: &str) -> String {
        if placeholder.is_empty() {
            return self.prompt.clone();
        }
        self.prompt.replace(placeholder, allergen)
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Option labels in display order.
    pub fn option_labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label()).collect()
    }

    /// Destination for an exact (case-sensitive) option label.
    pub fn transition_for(&self, label: &str) -> Option<Transition> {
        self.options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.transition)
    }

    /// All destinations of this node in option order.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.options.iter().map(|o| o.transition)
    }
}

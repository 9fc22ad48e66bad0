//! Authored (raw) form of a decision graph.
//!
//! Question data is written with untyped branch targets: an integer is the
//! next question, a string is a terminal tag such as `END_SEVERE`. Loading
//! turns every target into a [`Transition`] and rejects anything that does
//! not fit, so nothing downstream has to inspect string prefixes.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::errors::GraphError;
use super::graph::DecisionGraph;
use super::node::{AnswerOption, QuestionId, QuestionNode, TerminalLabel, Transition};

/// Placeholder used when the authored data does not name one.
pub const DEFAULT_PLACEHOLDER: &str = "[ALLERGEN]";

/// Raw graph document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub root: u16,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    pub questions: Vec<QuestionDefinition>,
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

/// Raw question entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: u16,
    pub text: String,
    pub options: Vec<String>,
    pub branches: BranchTable,
}

/// Option label to destination, in authored order.
///
/// Repeated keys are kept as written so loading can reject them; a plain
/// map would silently keep only the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchTable(Vec<(String, BranchTarget)>);

impl BranchTable {
    pub fn get(&self, label: &str) -> Option<&BranchTarget> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, t)| t)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, BranchTarget)> for BranchTable {
    fn from_iter<I: IntoIterator<Item = (String, BranchTarget)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for BranchTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, target) in &self.0 {
            map.serialize_entry(label, target)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BranchTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BranchTableVisitor;

        impl<'de> Visitor<'de> for BranchTableVisitor {
            type Value = BranchTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of option labels to branch targets")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, BranchTarget>()? {
                    entries.push(entry);
                }
                Ok(BranchTable(entries))
            }
        }

        deserializer.deserialize_map(BranchTableVisitor)
    }
}

/// Untyped branch destination as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BranchTarget {
    Question(u16),
    Terminal(String),
}

impl GraphDefinition {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        serde_json::from_str(json).map_err(|e| GraphError::Malformed(e.to_string()))
    }

    /// Converts and validates into a [`DecisionGraph`].
    pub fn build(self) -> Result<DecisionGraph, GraphError> {
        let root = QuestionId::new(self.root).map_err(|_| GraphError::InvalidQuestionId)?;
        let nodes = self
            .questions
            .into_iter()
            .map(QuestionDefinition::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        DecisionGraph::new(root, self.placeholder, nodes)
    }
}

impl QuestionDefinition {
    /// Converts one raw question, checking that options and branches agree.
    pub fn into_node(self) -> Result<QuestionNode, GraphError> {
        let id = QuestionId::new(self.id).map_err(|_| GraphError::InvalidQuestionId)?;
        let mut branches = BTreeMap::new();
        for (label, target) in self.branches.0 {
            if branches.contains_key(&label) {
                return Err(GraphError::DuplicateOption {
                    question: id,
                    option: label,
                });
            }
            branches.insert(label, target);
        }

        for (idx, label) in self.options.iter().enumerate() {
            if self.options[..idx].contains(label) {
                return Err(GraphError::DuplicateOption {
                    question: id,
                    option: label.clone(),
                });
            }
        }

        let mut options = Vec::with_capacity(self.options.len());
        for label in self.options {
            let target = branches
                .remove(&label)
                .ok_or_else(|| GraphError::MissingTransition {
                    question: id,
                    option: label.clone(),
                })?;
            let transition = target.into_transition(id)?;
            options.push(AnswerOption::new(label, transition));
        }

        if let Some(extra) = branches.into_keys().next() {
            return Err(GraphError::OrphanTransition {
                question: id,
                option: extra,
            });
        }

        QuestionNode::new(id, self.text, options)
    }
}

impl BranchTarget {
    fn into_transition(self, question: QuestionId) -> Result<Transition, GraphError> {
        match self {
            BranchTarget::Question(n) => QuestionId::new(n)
                .map(Transition::Next)
                .map_err(|_| GraphError::InvalidQuestionId),
            BranchTarget::Terminal(tag) => tag
                .parse::<TerminalLabel>()
                .map(Transition::Terminal)
                .map_err(|_| GraphError::UnknownTerminal { question, tag }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(n: u16) -> QuestionId {
        QuestionId::new(n).unwrap()
    }

    fn question(id: u16, options: &[&str], branches: &[(&str, BranchTarget)]) -> QuestionDefinition {
        QuestionDefinition {
            id,
            text: format!("Question {} about [ALLERGEN]?", id),
            options: options.iter().map(|s| s.to_string()).collect(),
            branches: branches
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn end(tag: &str) -> BranchTarget {
        BranchTarget::Terminal(tag.to_string())
    }

    #[test]
    fn parses_integer_and_string_targets() {
        let json = r#"{
            "root": 1,
            "questions": [
                {"id": 1, "text": "Eat [ALLERGEN]?", "options": ["Yes", "No"],
                 "branches": {"Yes": "END_MILD", "No": 2}},
                {"id": 2, "text": "Touch it?", "options": ["Yes", "No"],
                 "branches": {"Yes": "END_MODERATE", "No": "END_SEVERE"}}
            ]
        }"#;
        let def = GraphDefinition::from_json(json).unwrap();
        assert_eq!(def.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(def.questions[0].branches.get("No"), Some(&BranchTarget::Question(2)));
        assert_eq!(def.questions[0].branches.get("Yes"), Some(&end("END_MILD")));

        let graph = def.build().unwrap();
        let node = graph.node(qid(1)).unwrap();
        assert_eq!(node.transition_for("No"), Some(Transition::Next(qid(2))));
        assert_eq!(
            node.transition_for("Yes"),
            Some(Transition::Terminal(TerminalLabel::Mild))
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = GraphDefinition::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GraphError::Malformed(_)));
    }

    #[test]
    fn option_without_branch_is_rejected() {
        let def = question(5, &["Yes", "No"], &[("Yes", end("END_MILD"))]);
        assert_eq!(
            def.into_node().unwrap_err(),
            GraphError::MissingTransition {
                question: qid(5),
                option: "No".into()
            }
        );
    }

    #[test]
    fn branch_without_option_is_rejected() {
        let def = question(
            6,
            &["Yes"],
            &[("Yes", end("END_MILD")), ("Sometimes", end("END_SEVERE"))],
        );
        assert_eq!(
            def.into_node().unwrap_err(),
            GraphError::OrphanTransition {
                question: qid(6),
                option: "Sometimes".into()
            }
        );
    }

    #[test]
    fn unknown_terminal_tag_is_rejected() {
        let def = question(7, &["Yes"], &[("Yes", end("END_CATASTROPHIC"))]);
        assert_eq!(
            def.into_node().unwrap_err(),
            GraphError::UnknownTerminal {
                question: qid(7),
                tag: "END_CATASTROPHIC".into()
            }
        );
    }

    #[test]
    fn string_without_end_prefix_is_rejected() {
        let def = question(8, &["Yes"], &[("Yes", end("9"))]);
        assert!(matches!(
            def.into_node().unwrap_err(),
            GraphError::UnknownTerminal { .. }
        ));
    }

    #[test]
    fn zero_ids_are_rejected() {
        let def = question(0, &["Yes"], &[("Yes", end("END_MILD"))]);
        assert_eq!(def.into_node().unwrap_err(), GraphError::InvalidQuestionId);

        let def = question(1, &["Yes"], &[("Yes", BranchTarget::Question(0))]);
        assert_eq!(def.into_node().unwrap_err(), GraphError::InvalidQuestionId);
    }

    #[test]
    fn duplicate_option_is_rejected() {
        let def = question(
            2,
            &["Yes", "Yes"],
            &[("Yes", end("END_MILD"))],
        );
        assert_eq!(
            def.into_node().unwrap_err(),
            GraphError::DuplicateOption {
                question: qid(2),
                option: "Yes".into()
            }
        );
    }

    #[test]
    fn repeated_branch_key_is_rejected() {
        let json = r#"{
            "root": 1,
            "questions": [
                {"id": 1, "text": "Eat [ALLERGEN]?", "options": ["Yes", "No"],
                 "branches": {"Yes": "END_MILD", "No": "END_SEVERE", "Yes": "END_MODERATE"}}
            ]
        }"#;
        let def = GraphDefinition::from_json(json).unwrap();
        assert_eq!(def.questions[0].branches.len(), 3);
        assert_eq!(
            def.build().unwrap_err(),
            GraphError::DuplicateOption {
                question: qid(1),
                option: "Yes".into()
            }
        );
    }

    #[test]
    fn branch_table_serializes_as_map() {
        let table: BranchTable = [("Yes".to_string(), end("END_MILD"))].into_iter().collect();
        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"{"Yes":"END_MILD"}"#
        );
    }
}

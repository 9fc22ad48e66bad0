//! DecisionGraph - validated, immutable question graph.
//!
//! A graph is only constructible through [`DecisionGraph::new`], which
//! checks the whole structure once:
//!
//! - question ids are unique and the root exists
//! - every transition targets a defined question
//! - every question is reachable from the root
//! - there are no cycles, so every traversal ends at a terminal
//!
//! Option/branch agreement is enforced earlier, by [`QuestionNode`]
//! construction and by the raw definition loader.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use super::errors::GraphError;
use super::node::{QuestionId, QuestionNode, TerminalLabel, Transition};

/// Immutable directed acyclic graph of questions ending in terminal labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionGraph {
    root: QuestionId,
    placeholder: String,
    nodes: BTreeMap<QuestionId, QuestionNode>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

impl DecisionGraph {
    /// Builds and validates a graph.
    ///
    /// # Errors
    ///
    /// Any structural inconsistency, see [`GraphError`].
    pub fn new(
        root: QuestionId,
        placeholder: impl Into<String>,
        nodes: Vec<QuestionNode>,
    ) -> Result<Self, GraphError> {
        if nodes.is_empty() {
            return Err(GraphError::Empty);
        }

        let mut by_id = BTreeMap::new();
        for node in nodes {
            let id = node.id();
            if by_id.insert(id, node).is_some() {
                return Err(GraphError::DuplicateQuestion(id));
            }
        }

        let graph = Self {
            root,
            placeholder: placeholder.into(),
            nodes: by_id,
        };
        graph.validate()?;
        Ok(graph)
    }

    fn validate(&self) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&self.root) {
            return Err(GraphError::MissingRoot(self.root));
        }
        self.check_targets()?;
        self.check_reachability()?;
        self.check_acyclic()
    }

    fn check_targets(&self) -> Result<(), GraphError> {
        for node in self.nodes.values() {
            for option in node.options() {
                if let Transition::Next(target) = option.transition() {
                    if !self.nodes.contains_key(&target) {
                        return Err(GraphError::DanglingTarget {
                            question: node.id(),
                            option: option.label().to_string(),
                            target,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_reachability(&self) -> Result<(), GraphError> {
        let mut seen = BTreeSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            for transition in self.nodes[&id].transitions() {
                if let Transition::Next(next) = transition {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        match self.nodes.keys().find(|id| !seen.contains(id)) {
            Some(id) => Err(GraphError::Unreachable(*id)),
            None => Ok(()),
        }
    }

    fn check_acyclic(&self) -> Result<(), GraphError> {
        let mut marks = HashMap::with_capacity(self.nodes.len());
        self.visit(self.root, &mut marks)
    }

    fn visit(&self, id: QuestionId, marks: &mut HashMap<QuestionId, Mark>) -> Result<(), GraphError> {
        match marks.get(&id) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => return Err(GraphError::Cycle(id)),
            None => {}
        }
        marks.insert(id, Mark::InProgress);
        for transition in self.nodes[&id].transitions() {
            if let Transition::Next(next) = transition {
                self.visit(next, marks)?;
            }
        }
        marks.insert(id, Mark::Done);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Question every assessment starts at.
    pub fn root(&self) -> QuestionId {
        self.root
    }

    /// Token in prompt templates that is replaced by the allergen name.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn node(&self, id: QuestionId) -> Option<&QuestionNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Question ids in ascending order.
    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &QuestionNode> {
        self.nodes.values()
    }

    /// Terminal labels that at least one answer path ends in.
    pub fn reachable_terminals(&self) -> BTreeSet<TerminalLabel> {
        self.nodes
            .values()
            .flat_map(|node| node.transitions())
            .filter_map(|t| match t {
                Transition::Terminal(label) => Some(label),
                Transition::Next(_) => None,
            })
            .collect()
    }

    /// Greatest number of answers any traversal from the root can take.
    pub fn longest_path(&self) -> usize {
        let mut memo = HashMap::with_capacity(self.nodes.len());
        self.depth(self.root, &mut memo)
    }

    fn depth(&self, id: QuestionId, memo: &mut HashMap<QuestionId, usize>) -> usize {
        if let Some(&d) = memo.get(&id) {
            return d;
        }
        let deepest_child = self.nodes[&id]
            .transitions()
            .filter_map(|t| match t {
                Transition::Next(next) => Some(next),
                Transition::Terminal(_) => None,
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|next| self.depth(next, memo))
            .max()
            .unwrap_or(0);
        let d = deepest_child + 1;
        memo.insert(id, d);
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::node::AnswerOption;

    fn qid(n: u16) -> QuestionId {
        QuestionId::new(n).unwrap()
    }

    fn next(n: u16) -> Transition {
        Transition::Next(qid(n))
    }

    fn end(label: TerminalLabel) -> Transition {
        Transition::Terminal(label)
    }

    fn node(id: u16, branches: &[(&str, Transition)]) -> QuestionNode {
        QuestionNode::new(
            qid(id),
            format!("Question {} about [ALLERGEN]", id),
            branches
                .iter()
                .map(|(label, t)| AnswerOption::new(*label, *t))
                .collect(),
        )
        .unwrap()
    }

    fn small_graph() -> DecisionGraph {
        DecisionGraph::new(
            qid(1),
            "[ALLERGEN]",
            vec![
                node(1, &[("Yes", end(TerminalLabel::Mild)), ("No", next(2))]),
                node(2, &[("Yes", end(TerminalLabel::Moderate)), ("No", next(3))]),
                node(3, &[("A", end(TerminalLabel::Severe)), ("B", end(TerminalLabel::Severe))]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn valid_graph_exposes_queries() {
        let graph = small_graph();
        assert_eq!(graph.root(), qid(1));
        assert_eq!(graph.len(), 3);
        assert!(graph.contains(qid(3)));
        assert!(!graph.contains(qid(4)));
        assert_eq!(graph.question_ids().collect::<Vec<_>>(), vec![qid(1), qid(2), qid(3)]);
    }

    #[test]
    fn reachable_terminals_are_collected() {
        let terminals = small_graph().reachable_terminals();
        assert_eq!(
            terminals.into_iter().collect::<Vec<_>>(),
            vec![TerminalLabel::Mild, TerminalLabel::Moderate, TerminalLabel::Severe]
        );
    }

    #[test]
    fn longest_path_counts_answers() {
        assert_eq!(small_graph().longest_path(), 3);
    }

    #[test]
    fn empty_graph_is_rejected() {
        assert_eq!(
            DecisionGraph::new(qid(1), "[ALLERGEN]", vec![]).unwrap_err(),
            GraphError::Empty
        );
    }

    #[test]
    fn duplicate_question_is_rejected() {
        let err = DecisionGraph::new(
            qid(1),
            "[ALLERGEN]",
            vec![
                node(1, &[("Yes", end(TerminalLabel::Mild))]),
                node(1, &[("No", end(TerminalLabel::Severe))]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, GraphError::DuplicateQuestion(qid(1)));
    }

    #[test]
    fn missing_root_is_rejected() {
        let err = DecisionGraph::new(
            qid(9),
            "[ALLERGEN]",
            vec![node(1, &[("Yes", end(TerminalLabel::Mild))])],
        )
        .unwrap_err();
        assert_eq!(err, GraphError::MissingRoot(qid(9)));
    }

    #[test]
    fn dangling_target_is_rejected() {
        let err = DecisionGraph::new(
            qid(1),
            "[ALLERGEN]",
            vec![node(1, &[("Yes", end(TerminalLabel::Mild)), ("No", next(42))])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingTarget {
                question: qid(1),
                option: "No".into(),
                target: qid(42),
            }
        );
    }

    #[test]
    fn unreachable_question_is_rejected() {
        let err = DecisionGraph::new(
            qid(1),
            "[ALLERGEN]",
            vec![
                node(1, &[("Yes", end(TerminalLabel::Mild))]),
                node(2, &[("Yes", end(TerminalLabel::Severe))]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, GraphError::Unreachable(qid(2)));
    }

    #[test]
    fn cycle_is_rejected() {
        let err = DecisionGraph::new(
            qid(1),
            "[ALLERGEN]",
            vec![
                node(1, &[("Yes", end(TerminalLabel::Mild)), ("No", next(2))]),
                node(2, &[("Back", next(3)), ("Stop", end(TerminalLabel::Severe))]),
                node(3, &[("Again", next(2))]),
            ],
        )
        .unwrap_err();
        assert_eq!(err, GraphError::Cycle(qid(2)));
    }

    #[test]
    fn self_loop_is_rejected() {
        let err = DecisionGraph::new(
            qid(1),
            "[ALLERGEN]",
            vec![node(1, &[("Stay", next(1)), ("Leave", end(TerminalLabel::Mild))])],
        )
        .unwrap_err();
        assert_eq!(err, GraphError::Cycle(qid(1)));
    }

    #[test]
    fn diamond_shape_is_not_a_cycle() {
        let graph = DecisionGraph::new(
            qid(1),
            "[ALLERGEN]",
            vec![
                node(1, &[("L", next(2)), ("R", next(3))]),
                node(2, &[("Go", next(4))]),
                node(3, &[("Go", next(4))]),
                node(4, &[("Done", end(TerminalLabel::LifeThreatening))]),
            ],
        )
        .unwrap();
        assert_eq!(graph.longest_path(), 3);
    }
}

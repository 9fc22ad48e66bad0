//! Traversal engine - one step through the decision graph.

use super::errors::AssessmentError;
use super::graph::DecisionGraph;
use super::node::{QuestionId, TerminalLabel, Transition};

/// Result of answering one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Continue(QuestionId),
    Terminate(TerminalLabel),
}

impl From<Transition> for NextStep {
    fn from(t: Transition) -> Self {
        match t {
            Transition::Next(id) => NextStep::Continue(id),
            Transition::Terminal(label) => NextStep::Terminate(label),
        }
    }
}

/// Stateless stepper over a borrowed graph.
#[derive(Debug, Clone, Copy)]
pub struct TraversalEngine<'g> {
    graph: &'g DecisionGraph,
}

impl<'g> TraversalEngine<'g> {
    pub fn new(graph: &'g DecisionGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g DecisionGraph {
        self.graph
    }

    /// Where `chosen_option` at `current` leads.
    ///
    /// The option must match one of the question's labels exactly; no
    /// trimming or case folding is applied.
    ///
    /// # Errors
    ///
    /// - `UnknownNode` if `current` is not in the graph
    /// - `InvalidOption` if the question does not offer `chosen_option`
    pub fn advance(
        &self,
        current: QuestionId,
        chosen_option: &str,
    ) -> Result<NextStep, AssessmentError> {
        let node = self
            .graph
            .node(current)
            .ok_or(AssessmentError::UnknownNode(current))?;

        node.transition_for(chosen_option)
            .map(NextStep::from)
            .ok_or_else(|| AssessmentError::InvalidOption {
                question: current,
                option: chosen_option.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::standard_graph;

    fn qid(n: u16) -> QuestionId {
        QuestionId::new(n).unwrap()
    }

    fn engine() -> TraversalEngine<'static> {
        TraversalEngine::new(standard_graph().unwrap())
    }

    #[test]
    fn continues_to_next_question() {
        assert_eq!(
            engine().advance(qid(1), "No, I get reactions"),
            Ok(NextStep::Continue(qid(2)))
        );
    }

    #[test]
    fn terminates_on_terminal_branch() {
        assert_eq!(
            engine().advance(qid(1), "Yes, no problems"),
            Ok(NextStep::Terminate(TerminalLabel::Mild))
        );
        assert_eq!(
            engine().advance(qid(30), "Avoid these situations completely"),
            Ok(NextStep::Terminate(TerminalLabel::LifeThreatening))
        );
    }

    #[test]
    fn branches_may_share_a_destination() {
        let e = engine();
        assert_eq!(e.advance(qid(11), "Within 30 minutes"), Ok(NextStep::Continue(qid(12))));
        assert_eq!(e.advance(qid(11), "It varies"), Ok(NextStep::Continue(qid(12))));
    }

    #[test]
    fn unknown_option_is_invalid() {
        assert_eq!(
            engine().advance(qid(1), "Maybe"),
            Err(AssessmentError::InvalidOption {
                question: qid(1),
                option: "Maybe".into()
            })
        );
    }

    #[test]
    fn option_match_is_case_sensitive_and_untrimmed() {
        let e = engine();
        assert!(e.advance(qid(1), "yes, no problems").is_err());
        assert!(e.advance(qid(1), "Yes, no problems ").is_err());
    }

    #[test]
    fn option_from_another_question_is_invalid() {
        assert!(matches!(
            engine().advance(qid(2), "Yes, no problems"),
            Err(AssessmentError::InvalidOption { .. })
        ));
    }

    #[test]
    fn unknown_node_is_reported() {
        assert_eq!(
            engine().advance(qid(31), "Yes, no problems"),
            Err(AssessmentError::UnknownNode(qid(31)))
        );
    }
}

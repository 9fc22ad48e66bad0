//! AssessmentSession - runs one questionnaire for one allergen.
//!
//! # State machine
//!
//! ```text
//! AwaitingAnswer(root) --answer--> AwaitingAnswer(next) --answer--> ... --> Completed
//! ```
//!
//! Answers are validated against the current question before they are
//! logged: a rejected answer leaves both the log and the state untouched.
//! Once completed, every operation except the read-only accessors fails
//! with `SessionCompleted`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::errors::{AssessmentError, GraphError};
use super::graph::DecisionGraph;
use super::node::{QuestionId, QuestionNode, TerminalLabel};
use super::progress::Progress;
use super::severity::{SeverityProfile, SeverityResolver};
use super::standard::standard_graph;
use super::traversal::{NextStep, TraversalEngine};
use crate::domain::foundation::AssessmentId;

/// One answered question, in the shape stored on the allergy card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    /// Prompt exactly as shown, allergen already substituted.
    pub question: String,
    pub response: String,
}

/// Everything the card-creation flow needs once the questionnaire ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub terminal: TerminalLabel,
    pub severity: SeverityProfile,
    pub responses: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentState {
    AwaitingAnswer(QuestionId),
    Completed(AssessmentResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Another question follows.
    More(QuestionId),
    /// A terminal was reached.
    Done(AssessmentResult),
}

/// Transient per-user questionnaire state.
///
/// Not shared between users and never persisted; drop it to cancel.
#[derive(Debug, Clone)]
pub struct AssessmentSession<'g> {
    id: AssessmentId,
    engine: TraversalEngine<'g>,
    resolver: &'g SeverityResolver,
    state: AssessmentState,
    log: Vec<AnswerRecord>,
}

impl AssessmentSession<'static> {
    /// Starts over the built-in question tree and severity table.
    ///
    /// # Errors
    ///
    /// The built-in tree failed load-time validation.
    pub fn standard() -> Result<Self, GraphError> {
        Ok(AssessmentSession::start(
            standard_graph()?,
            SeverityResolver::standard(),
        ))
    }
}

impl<'g> AssessmentSession<'g> {
    /// Starts at the graph's root.
    pub fn start(graph: &'g DecisionGraph, resolver: &'g SeverityResolver) -> Self {
        let id = AssessmentId::new();
        debug!(assessment_id = %id, root = %graph.root(), "Assessment started");
        Self {
            id,
            engine: TraversalEngine::new(graph),
            resolver,
            state: AssessmentState::AwaitingAnswer(graph.root()),
            log: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> AssessmentId {
        self.id
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.state, AssessmentState::Completed(_))
    }

    /// Answers recorded so far, oldest first.
    pub fn log(&self) -> &[AnswerRecord] {
        &self.log
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.log.len())
    }

    /// Final result, once completed.
    pub fn result(&self) -> Option<&AssessmentResult> {
        match &self.state {
            AssessmentState::Completed(result) => Some(result),
            AssessmentState::AwaitingAnswer(_) => None,
        }
    }

    /// Question awaiting an answer.
    pub fn current_question(&self) -> Result<QuestionId, AssessmentError> {
        match self.state {
            AssessmentState::AwaitingAnswer(id) => Ok(id),
            AssessmentState::Completed(_) => Err(AssessmentError::SessionCompleted),
        }
    }

    fn current_node(&self) -> Result<&'g QuestionNode, AssessmentError> {
        let id = self.current_question()?;
        self.engine
            .graph()
            .node(id)
            .ok_or(AssessmentError::UnknownNode(id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Presentation queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Current prompt with every placeholder replaced by `allergen_name`.
    pub fn current_prompt(&self, allergen_name: &str) -> Result<String, AssessmentError> {
        let node = self.current_node()?;
        Ok(node.render_prompt(self.engine.graph().placeholder(), allergen_name))
    }

    /// Current option labels in display order.
    pub fn current_options(&self) -> Result<Vec<&'g str>, AssessmentError> {
        Ok(self.current_node()?.option_labels())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records an answer and moves on.
    ///
    /// `displayed_prompt` is logged verbatim as the question text.
    ///
    /// # Errors
    ///
    /// - `SessionCompleted` if a terminal was already reached
    /// - `InvalidOption` if the current question does not offer
    ///   `chosen_option`; nothing is logged in that case
    /// - `UnknownTerminal` if the severity table lacks the reached label
    pub fn submit_answer(
        &mut self,
        chosen_option: &str,
        displayed_prompt: &str,
    ) -> Result<StepOutcome, AssessmentError> {
        let current = self.current_question()?;

        let step = match self.engine.advance(current, chosen_option) {
            Ok(step) => step,
            Err(err) => {
                warn!(
                    assessment_id = %self.id,
                    question_id = %current,
                    option = chosen_option,
                    "Rejected answer: {}",
                    err
                );
                return Err(err);
            }
        };

        match step {
            NextStep::Continue(next) => {
                self.record(current, displayed_prompt, chosen_option);
                debug!(
                    assessment_id = %self.id,
                    question_id = %current,
                    next_question = %next,
                    "Answer recorded"
                );
                self.state = AssessmentState::AwaitingAnswer(next);
                Ok(StepOutcome::More(next))
            }
            NextStep::Terminate(terminal) => {
                // Resolve first so an incomplete severity table leaves no
                // half-applied step behind.
                let severity = self.resolver.resolve(terminal)?;
                self.record(current, displayed_prompt, chosen_option);
                info!(
                    assessment_id = %self.id,
                    severity = %severity.level,
                    answers = self.log.len(),
                    "Assessment completed"
                );
                let result = AssessmentResult {
                    terminal,
                    severity,
                    responses: self.log.clone(),
                };
                self.state = AssessmentState::Completed(result.clone());
                Ok(StepOutcome::Done(result))
            }
        }
    }

    fn record(&mut self, question_id: QuestionId, displayed_prompt: &str, chosen_option: &str) {
        self.log.push(AnswerRecord {
            question_id,
            question: displayed_prompt.to_string(),
            response: chosen_option.to_string(),
        });
    }

    /// Renders the current prompt for `allergen_name` and submits `chosen_option`.
    pub fn answer(
        &mut self,
        allergen_name: &str,
        chosen_option: &str,
    ) -> Result<StepOutcome, AssessmentError> {
        let prompt = self.current_prompt(allergen_name)?;
        self.submit_answer(chosen_option, &prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::node::{AnswerOption, Transition};
    use crate::domain::questionnaire::severity::{SeverityLevel, SeverityProfile};

    fn qid(n: u16) -> QuestionId {
        QuestionId::new(n).unwrap()
    }

    fn session() -> AssessmentSession<'static> {
        AssessmentSession::standard().unwrap()
    }

    #[test]
    fn starts_at_root_with_empty_log() {
        let s = session();
        assert_eq!(s.state(), &AssessmentState::AwaitingAnswer(qid(1)));
        assert!(s.log().is_empty());
        assert!(!s.is_completed());
        assert!(s.result().is_none());
    }

    #[test]
    fn current_prompt_substitutes_allergen() {
        let s = session();
        assert_eq!(
            s.current_prompt("Peanuts").unwrap(),
            "Can you safely eat Peanuts directly?"
        );
    }

    #[test]
    fn current_options_are_in_authored_order() {
        assert_eq!(
            session().current_options().unwrap(),
            vec!["Yes, no problems", "No, I get reactions"]
        );
    }

    #[test]
    fn continue_step_moves_to_next_question() {
        let mut s = session();
        let outcome = s.answer("Milk", "No, I get reactions").unwrap();
        assert_eq!(outcome, StepOutcome::More(qid(2)));
        assert_eq!(s.current_question().unwrap(), qid(2));
        assert_eq!(s.log().len(), 1);
        assert_eq!(s.log()[0].question, "Can you safely eat Milk directly?");
        assert_eq!(s.progress().question_number(), 2);
    }

    #[test]
    fn submit_answer_logs_displayed_prompt_verbatim() {
        let mut s = session();
        s.submit_answer("No, I get reactions", "custom text").unwrap();
        assert_eq!(
            s.log()[0],
            AnswerRecord {
                question_id: qid(1),
                question: "custom text".into(),
                response: "No, I get reactions".into(),
            }
        );
    }

    #[test]
    fn terminal_answer_completes() {
        let mut s = session();
        let outcome = s.answer("Milk", "Yes, no problems").unwrap();
        let StepOutcome::Done(result) = outcome else {
            panic!("expected completion");
        };
        assert_eq!(result.terminal, TerminalLabel::Mild);
        assert_eq!(result.severity.level, SeverityLevel::Mild);
        assert_eq!(result.responses.len(), 1);
        assert!(s.is_completed());
        assert_eq!(s.result(), Some(&result));
    }

    #[test]
    fn rejected_answer_leaves_log_and_state_untouched() {
        let mut s = session();
        s.answer("Eggs", "No, I get reactions").unwrap();

        let err = s.answer("Eggs", "Not an option").unwrap_err();
        assert_eq!(
            err,
            AssessmentError::InvalidOption {
                question: qid(2),
                option: "Not an option".into()
            }
        );
        assert_eq!(s.log().len(), 1);
        assert_eq!(s.current_question().unwrap(), qid(2));
    }

    #[test]
    fn operations_after_completion_fail() {
        let mut s = session();
        s.answer("Soy", "Yes, no problems").unwrap();

        assert_eq!(s.current_prompt("Soy"), Err(AssessmentError::SessionCompleted));
        assert_eq!(s.current_options(), Err(AssessmentError::SessionCompleted));
        assert_eq!(
            s.submit_answer("Yes, no problems", "again"),
            Err(AssessmentError::SessionCompleted)
        );
        assert_eq!(s.log().len(), 1);
    }

    #[test]
    fn missing_severity_profile_is_reported_without_logging() {
        let graph = DecisionGraph::new(
            qid(1),
            "[ALLERGEN]",
            vec![QuestionNode::new(
                qid(1),
                "Eat [ALLERGEN]?",
                vec![AnswerOption::new(
                    "No",
                    Transition::Terminal(TerminalLabel::Severe),
                )],
            )
            .unwrap()],
        )
        .unwrap();
        let resolver = SeverityResolver::from_profiles([(
            TerminalLabel::Mild,
            SeverityProfile::new(SeverityLevel::Mild, "fine"),
        )]);

        let mut s = AssessmentSession::start(&graph, &resolver);
        assert_eq!(
            s.answer("Fish", "No"),
            Err(AssessmentError::UnknownTerminal(TerminalLabel::Severe))
        );
        assert!(s.log().is_empty());
        assert!(!s.is_completed());
    }

    #[test]
    fn sessions_have_independent_ids() {
        assert_ne!(session().id(), session().id());
    }
}

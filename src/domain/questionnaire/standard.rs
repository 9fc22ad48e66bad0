//! The built-in food allergy question tree.
//!
//! Thirty questions authored in `question_tree.json`, parsed and validated
//! once per process on first use.

use once_cell::sync::Lazy;

use super::definition::GraphDefinition;
use super::errors::GraphError;
use super::graph::DecisionGraph;
use super::severity::SeverityResolver;

const QUESTION_TREE_JSON: &str = include_str!("question_tree.json");

static STANDARD_GRAPH: Lazy<Result<DecisionGraph, GraphError>> = Lazy::new(|| {
    let graph = GraphDefinition::from_json(QUESTION_TREE_JSON)?.build()?;
    SeverityResolver::standard().verify_coverage(&graph)?;
    tracing::debug!(
        questions = graph.len(),
        longest_path = graph.longest_path(),
        "Loaded standard question tree"
    );
    Ok(graph)
});

/// The validated standard decision graph.
///
/// # Errors
///
/// Returns the load-time inconsistency if the embedded data is broken.
/// Callers should treat this as fatal at startup.
pub fn standard_graph() -> Result<&'static DecisionGraph, GraphError> {
    STANDARD_GRAPH.as_ref().map_err(Clone::clone)
}

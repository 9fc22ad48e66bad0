//! Severity resolution - terminal label to severity tier and description.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::errors::{AssessmentError, GraphError};
use super::graph::DecisionGraph;
use super::node::TerminalLabel;

/// Severity tier as persisted on an allergy card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Mild,
    Moderate,
    Severe,
    LifeThreatening,
}

impl SeverityLevel {
    /// Machine tag, e.g. `life_threatening`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Mild => "mild",
            SeverityLevel::Moderate => "moderate",
            SeverityLevel::Severe => "severe",
            SeverityLevel::LifeThreatening => "life_threatening",
        }
    }

    /// Tag with underscores replaced by spaces, e.g. `life threatening`.
    pub fn human_readable(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Severe and life-threatening allergies need the strictest handling.
    pub fn is_high_risk(&self) -> bool {
        matches!(self, SeverityLevel::Severe | SeverityLevel::LifeThreatening)
    }
}

impl From<TerminalLabel> for SeverityLevel {
    fn from(label: TerminalLabel) -> Self {
        match label {
            TerminalLabel::Mild => SeverityLevel::Mild,
            TerminalLabel::Moderate => SeverityLevel::Moderate,
            TerminalLabel::Severe => SeverityLevel::Severe,
            TerminalLabel::LifeThreatening => SeverityLevel::LifeThreatening,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity tier plus the fixed explanation shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityProfile {
    pub level: SeverityLevel,
    pub description: String,
}

impl SeverityProfile {
    pub fn new(level: SeverityLevel, description: impl Into<String>) -> Self {
        Self {
            level,
            description: description.into(),
        }
    }
}

const MILD_DESCRIPTION: &str = "Your allergy appears to be mild. You may experience minor symptoms but can generally tolerate some exposure or cross-contact. Continue to be cautious and avoid direct consumption.";

const MODERATE_DESCRIPTION: &str = "Your allergy is moderate and requires careful management. Cross-contamination can cause symptoms, so you should avoid shared cooking surfaces and read labels carefully.";

const SEVERE_DESCRIPTION: &str = "Your allergy is severe and requires strict avoidance. Even small amounts or airborne particles can trigger significant reactions. You should carry emergency medication and inform others about your allergy.";

const LIFE_THREATENING_DESCRIPTION: &str = "Your allergy is life-threatening and requires extreme caution. You are at risk for anaphylaxis and should always carry epinephrine, wear medical identification, and ensure others know about your emergency action plan.";

static STANDARD_RESOLVER: Lazy<SeverityResolver> = Lazy::new(|| {
    SeverityResolver::from_profiles([
        (
            TerminalLabel::Mild,
            SeverityProfile::new(SeverityLevel::Mild, MILD_DESCRIPTION),
        ),
        (
            TerminalLabel::Moderate,
            SeverityProfile::new(SeverityLevel::Moderate, MODERATE_DESCRIPTION),
        ),
        (
            TerminalLabel::Severe,
            SeverityProfile::new(SeverityLevel::Severe, SEVERE_DESCRIPTION),
        ),
        (
            TerminalLabel::LifeThreatening,
            SeverityProfile::new(SeverityLevel::LifeThreatening, LIFE_THREATENING_DESCRIPTION),
        ),
    ])
});

/// Maps terminal labels to severity profiles. Read-only once built.
#[derive(Debug, Clone)]
pub struct SeverityResolver {
    profiles: HashMap<TerminalLabel, SeverityProfile>,
}

impl SeverityResolver {
    /// The process-wide table covering all four terminal labels.
    pub fn standard() -> &'static SeverityResolver {
        &STANDARD_RESOLVER
    }

    /// Builds a resolver from explicit entries; later entries win.
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = (TerminalLabel, SeverityProfile)>,
    ) -> Self {
        Self {
            profiles: profiles.into_iter().collect(),
        }
    }

    /// Profile for a terminal label.
    ///
    /// # Errors
    ///
    /// - `UnknownTerminal` if the table has no entry. With a verified
    ///   resolver this is unreachable.
    pub fn resolve(&self, label: TerminalLabel) -> Result<SeverityProfile, AssessmentError> {
        self.profiles
            .get(&label)
            .cloned()
            .ok_or(AssessmentError::UnknownTerminal(label))
    }

    /// Checks that every terminal the graph can reach has a profile.
    pub fn verify_coverage(&self, graph: &DecisionGraph) -> Result<(), GraphError> {
        match graph
            .reachable_terminals()
            .into_iter()
            .find(|label| !self.profiles.contains_key(label))
        {
            Some(label) => Err(GraphError::UncoveredTerminal(label)),
            None => Ok(()),
        }
    }
}

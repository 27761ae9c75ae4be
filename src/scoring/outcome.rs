//! Outcome classifications and the category kinds that group them.
//!
//! Every metric category declares the closed set of outcomes its individual
//! results can have. Scoring is driven entirely by these declarations: a new
//! category is a new [`CategoryKind`] with its outcome set, not a new scoring
//! code path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an individual result within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
    /// Mutation killed by the test suite
    Detected,
    /// Mutation that survived the test suite
    Undetected,
    Error,
    High,
    Normal,
    Low,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
            Outcome::Detected => "detected",
            Outcome::Undetected => "undetected",
            Outcome::Error => "error",
            Outcome::High => "high",
            Outcome::Normal => "normal",
            Outcome::Low => "low",
        }
    }

    /// Column heading used in rendered tables.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Passed => "Passed",
            Outcome::Failed => "Failed",
            Outcome::Skipped => "Skipped",
            Outcome::Detected => "Detected",
            Outcome::Undetected => "Undetected",
            Outcome::Error => "Errors",
            Outcome::High => "High",
            Outcome::Normal => "Normal",
            Outcome::Low => "Low",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An independent metric source contributing to the aggregated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Tests,
    Mutations,
    Analysis,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 3] = [
        CategoryKind::Tests,
        CategoryKind::Mutations,
        CategoryKind::Analysis,
    ];

    /// Stable category key
    pub fn id(self) -> &'static str {
        match self {
            CategoryKind::Tests => "tests",
            CategoryKind::Mutations => "mutations",
            CategoryKind::Analysis => "analysis",
        }
    }

    /// Outcomes a result of this kind is classified into, in display order.
    pub fn outcomes(self) -> &'static [Outcome] {
        match self {
            CategoryKind::Tests => &[Outcome::Passed, Outcome::Skipped, Outcome::Failed],
            CategoryKind::Mutations => &[Outcome::Detected, Outcome::Undetected],
            CategoryKind::Analysis => &[
                Outcome::Error,
                Outcome::High,
                Outcome::Normal,
                Outcome::Low,
            ],
        }
    }

    pub fn has_outcome(self, outcome: Outcome) -> bool {
        self.outcomes().contains(&outcome)
    }

    /// Whether results of this kind carry a "higher is better" percentage
    /// that relative grading can scale against.
    pub fn supports_ratio(self) -> bool {
        matches!(self, CategoryKind::Tests | CategoryKind::Mutations)
    }

    /// Outcomes counted as failures when a configuration does not say otherwise.
    pub fn default_failure_outcomes(self) -> &'static [Outcome] {
        match self {
            CategoryKind::Tests => &[Outcome::Failed],
            CategoryKind::Mutations | CategoryKind::Analysis => &[],
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_sets_are_disjoint() {
        for kind in CategoryKind::ALL {
            for other in CategoryKind::ALL.into_iter().filter(|k| *k != kind) {
                assert!(
                    kind.outcomes().iter().all(|o| !other.has_outcome(*o)),
                    "{kind} and {other} share an outcome"
                );
            }
        }
    }

    #[test]
    fn test_default_failure_outcomes_belong_to_kind() {
        for kind in CategoryKind::ALL {
            assert!(kind
                .default_failure_outcomes()
                .iter()
                .all(|o| kind.has_outcome(*o)));
        }
    }

    #[test]
    fn test_from_id_roundtrips() {
        for kind in CategoryKind::ALL {
            assert_eq!(CategoryKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(CategoryKind::from_id("coverage"), None);
    }

    #[test]
    fn test_outcome_deserializes_snake_case() {
        let outcome: Outcome = serde_json::from_str("\"undetected\"").unwrap();
        assert_eq!(outcome, Outcome::Undetected);
    }
}

//! Per-category grading configuration
//!
//! This module contains the validated [`GradingConfiguration`] consumed by the
//! scorer, and the serde-facing [`CategoryConfig`] section it is built from.

use crate::errors::{Error, Result};
use crate::scoring::{CategoryKind, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How weighted outcome counts turn into a category's impact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Weights are applied directly as point deltas.
    #[default]
    Absolute,
    /// The category's quality ratio is scaled to its maximum score.
    Relative,
}

/// Validated grading configuration for one category.
///
/// Built in one step by [`GradingConfiguration::new`] or from a TOML section
/// via [`CategoryConfig::into_configuration`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradingConfiguration {
    kind: CategoryKind,
    enabled: bool,
    max_score: i64,
    weights: BTreeMap<Outcome, i64>,
    mode: AggregationMode,
    failure_outcomes: BTreeSet<Outcome>,
}

impl GradingConfiguration {
    /// Create a configuration, counting the kind's default outcomes as failures.
    pub fn new(
        kind: CategoryKind,
        enabled: bool,
        max_score: i64,
        weights: BTreeMap<Outcome, i64>,
        mode: AggregationMode,
    ) -> Result<Self> {
        let failure_outcomes = kind.default_failure_outcomes().iter().copied().collect();
        Self::with_failure_outcomes(kind, enabled, max_score, weights, mode, failure_outcomes)
    }

    pub fn with_failure_outcomes(
        kind: CategoryKind,
        enabled: bool,
        max_score: i64,
        weights: BTreeMap<Outcome, i64>,
        mode: AggregationMode,
        failure_outcomes: BTreeSet<Outcome>,
    ) -> Result<Self> {
        validate_max_score(kind, max_score)?;
        validate_outcomes(kind, weights.keys(), "weight")?;
        validate_outcomes(kind, failure_outcomes.iter(), "failure outcome")?;
        validate_mode(kind, mode)?;

        Ok(Self {
            kind,
            enabled,
            max_score,
            weights,
            mode,
            failure_outcomes,
        })
    }

    /// Default configuration for a kind, as written by `autograde init`.
    pub fn default_for(kind: CategoryKind) -> Self {
        Self {
            kind,
            enabled: true,
            max_score: default_max_score(),
            weights: default_weights(kind),
            mode: AggregationMode::Absolute,
            failure_outcomes: kind.default_failure_outcomes().iter().copied().collect(),
        }
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_score(&self) -> i64 {
        self.max_score
    }

    /// Impact per unit of `outcome`; 0 when the outcome is not configured.
    pub fn weight(&self, outcome: Outcome) -> i64 {
        self.weights.get(&outcome).copied().unwrap_or(0)
    }

    pub fn weights(&self) -> &BTreeMap<Outcome, i64> {
        &self.weights
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    pub fn failure_outcomes(&self) -> &BTreeSet<Outcome> {
        &self.failure_outcomes
    }

    pub fn is_failure(&self, outcome: Outcome) -> bool {
        self.failure_outcomes.contains(&outcome)
    }
}

fn validate_max_score(kind: CategoryKind, max_score: i64) -> Result<()> {
    if max_score < 0 {
        return Err(Error::invalid_configuration(format!(
            "{kind}: max_score must not be negative, got {max_score}"
        )));
    }
    Ok(())
}

fn validate_outcomes<'a>(
    kind: CategoryKind,
    outcomes: impl IntoIterator<Item = &'a Outcome>,
    what: &str,
) -> Result<()> {
    match outcomes.into_iter().find(|o| !kind.has_outcome(**o)) {
        Some(foreign) => Err(Error::invalid_configuration(format!(
            "{kind}: {what} '{foreign}' is not an outcome of this category"
        ))),
        None => Ok(()),
    }
}

fn validate_mode(kind: CategoryKind, mode: AggregationMode) -> Result<()> {
    if mode == AggregationMode::Relative && !kind.supports_ratio() {
        return Err(Error::invalid_configuration(format!(
            "{kind}: relative grading needs a ratio, which this category does not define"
        )));
    }
    Ok(())
}

/// One category section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Upper bound of this category's contribution
    #[serde(default = "default_max_score")]
    pub max_score: i64,

    #[serde(default)]
    pub mode: AggregationMode,

    /// Outcomes that mark a result as failing; the kind's defaults when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_outcomes: Option<BTreeSet<Outcome>>,

    /// Impact per outcome; the kind's defaults when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<BTreeMap<Outcome, i64>>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_score: default_max_score(),
            mode: AggregationMode::default(),
            weights: None,
            failure_outcomes: None,
        }
    }
}

impl CategoryConfig {
    pub fn into_configuration(self, kind: CategoryKind) -> Result<GradingConfiguration> {
        let weights = self.weights.unwrap_or_else(|| default_weights(kind));
        let failure_outcomes = self
            .failure_outcomes
            .unwrap_or_else(|| kind.default_failure_outcomes().iter().copied().collect());

        GradingConfiguration::with_failure_outcomes(
            kind,
            self.enabled,
            self.max_score,
            weights,
            self.mode,
            failure_outcomes,
        )
    }
}

impl From<&GradingConfiguration> for CategoryConfig {
    fn from(configuration: &GradingConfiguration) -> Self {
        Self {
            enabled: configuration.enabled,
            max_score: configuration.max_score,
            mode: configuration.mode,
            weights: Some(configuration.weights.clone()),
            failure_outcomes: Some(configuration.failure_outcomes.clone()),
        }
    }
}

pub fn default_enabled() -> bool {
    true
}

pub fn default_max_score() -> i64 {
    100
}

/// Analysis findings only ever cost points; they offset the other categories.
pub fn default_weights(kind: CategoryKind) -> BTreeMap<Outcome, i64> {
    let pairs: &[(Outcome, i64)] = match kind {
        CategoryKind::Tests => &[
            (Outcome::Passed, 1),
            (Outcome::Failed, -5),
            (Outcome::Skipped, 0),
        ],
        CategoryKind::Mutations => &[(Outcome::Detected, 1), (Outcome::Undetected, -2)],
        CategoryKind::Analysis => &[
            (Outcome::Error, -4),
            (Outcome::High, -3),
            (Outcome::Normal, -2),
            (Outcome::Low, -1),
        ],
    };
    pairs.iter().copied().collect()
}

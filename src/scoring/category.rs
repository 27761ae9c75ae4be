//! Scoring of a single category result.
//!
//! [`CategoryScorer`] is the one scoring path for every category kind. Raw
//! counts are first normalized into per-outcome counts (inferring the outcomes
//! a report does not state directly), then weighted by the configuration.

use super::outcome::{CategoryKind, Outcome};
use crate::config::{AggregationMode, GradingConfiguration};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts as reported by an already-parsed metric report.
///
/// Fields are signed so that malformed reports reach the scorer and are
/// rejected as invalid input instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawCounts {
    /// Passed tests are inferred as `total - failed - skipped`.
    Tests {
        total: i64,
        #[serde(default)]
        failed: i64,
        #[serde(default)]
        skipped: i64,
    },
    /// Detected mutations are inferred as `total - undetected`.
    Mutations {
        total: i64,
        #[serde(default)]
        undetected: i64,
    },
    /// Findings per severity.
    Analysis {
        #[serde(default)]
        error: i64,
        #[serde(default)]
        high: i64,
        #[serde(default)]
        normal: i64,
        #[serde(default)]
        low: i64,
    },
}

impl RawCounts {
    pub fn kind(&self) -> CategoryKind {
        match self {
            RawCounts::Tests { .. } => CategoryKind::Tests,
            RawCounts::Mutations { .. } => CategoryKind::Mutations,
            RawCounts::Analysis { .. } => CategoryKind::Analysis,
        }
    }
}

/// Scored contribution of one report to its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    id: &'static str,
    display_name: String,
    kind: CategoryKind,
    counts: BTreeMap<Outcome, u64>,
    total_size: u64,
    total_impact: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<f64>,
    failure_count: u64,
}

impl CategoryResult {
    /// Stable category key, shared by every result of the same kind.
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn count(&self, outcome: Outcome) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<Outcome, u64> {
        &self.counts
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Signed contribution to the aggregated score.
    pub fn total_impact(&self) -> i64 {
        self.total_impact
    }

    /// Quality ratio in percent (higher is better), for ratio kinds only.
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count > 0
    }
}

/// Per-outcome counts of one report, before weighting.
struct NormalizedCounts {
    counts: BTreeMap<Outcome, u64>,
    total: u64,
    /// Percentage in `[0, 100]`, higher is better.
    quality: Option<f64>,
}

/// Turns raw counts into a [`CategoryResult`] under one configuration.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScorer<'a> {
    configuration: &'a GradingConfiguration,
}

impl<'a> CategoryScorer<'a> {
    pub fn new(configuration: &'a GradingConfiguration) -> Self {
        Self { configuration }
    }

    pub fn score(&self, display_name: impl Into<String>, raw: &RawCounts) -> Result<CategoryResult> {
        let kind = self.configuration.kind();
        if raw.kind() != kind {
            return Err(Error::invalid_input(format!(
                "{} counts cannot be scored with the {} configuration",
                raw.kind(),
                kind
            )));
        }

        let normalized = normalize(raw)?;
        let total_impact = match self.configuration.mode() {
            AggregationMode::Absolute => weighted_sum(&normalized.counts, self.configuration)?,
            AggregationMode::Relative => {
                relative_impact(normalized.quality, self.configuration.max_score())
            }
        };
        let failure_count = checked_total(
            normalized
                .counts
                .iter()
                .filter(|(outcome, _)| self.configuration.is_failure(**outcome))
                .map(|(_, count)| *count),
        )
        .ok_or_else(|| Error::invalid_input("failure count does not fit into 64 bits"))?;

        Ok(CategoryResult {
            id: kind.id(),
            display_name: display_name.into(),
            kind,
            counts: normalized.counts,
            total_size: normalized.total,
            total_impact,
            ratio: normalized.quality,
            failure_count,
        })
    }
}

/// Linear combination of counts and weights; may be negative.
///
/// Fails instead of wrapping when a count times its weight, or the sum, leaves
/// the `i64` range.
fn weighted_sum(counts: &BTreeMap<Outcome, u64>, configuration: &GradingConfiguration) -> Result<i64> {
    counts.iter().try_fold(0i64, |sum, (outcome, count)| {
        let weight = configuration.weight(*outcome);
        i64::try_from(*count)
            .ok()
            .and_then(|count| count.checked_mul(weight))
            .and_then(|impact| sum.checked_add(impact))
            .ok_or_else(|| {
                Error::invalid_input(format!(
                    "impact of {count} {outcome} results with weight {weight} overflows the score range"
                ))
            })
    })
}

fn relative_impact(quality: Option<f64>, max_score: i64) -> i64 {
    quality
        .map(|q| (max_score as f64 * q / 100.0).round() as i64)
        .unwrap_or(0)
}

/// Percentage of `part` in `total`; an empty total has no ratio and counts as 0.
fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

fn checked_total(counts: impl IntoIterator<Item = u64>) -> Option<u64> {
    counts
        .into_iter()
        .try_fold(0u64, |sum, count| sum.checked_add(count))
}

fn non_negative(name: &str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| Error::invalid_input(format!("{name} count must not be negative, got {value}")))
}

fn normalize(raw: &RawCounts) -> Result<NormalizedCounts> {
    match *raw {
        RawCounts::Tests {
            total,
            failed,
            skipped,
        } => {
            let total = non_negative("total", total)?;
            let failed = non_negative("failed", failed)?;
            let skipped = non_negative("skipped", skipped)?;
            let passed = total
                .checked_sub(failed)
                .and_then(|rest| rest.checked_sub(skipped))
                .ok_or_else(|| {
                    Error::invalid_input(format!(
                        "failed ({failed}) and skipped ({skipped}) tests exceed the total ({total})"
                    ))
                })?;

            Ok(NormalizedCounts {
                counts: BTreeMap::from([
                    (Outcome::Passed, passed),
                    (Outcome::Failed, failed),
                    (Outcome::Skipped, skipped),
                ]),
                total,
                quality: Some(percentage(passed, total)),
            })
        }
        RawCounts::Mutations { total, undetected } => {
            let total = non_negative("total", total)?;
            let undetected = non_negative("undetected", undetected)?;
            let detected = total.checked_sub(undetected).ok_or_else(|| {
                Error::invalid_input(format!(
                    "undetected mutations ({undetected}) exceed the total ({total})"
                ))
            })?;
            // Without mutations there is nothing to kill: ratio and impact are both 0.
            let quality = if total == 0 {
                0.0
            } else {
                100.0 - percentage(undetected, total)
            };

            Ok(NormalizedCounts {
                counts: BTreeMap::from([
                    (Outcome::Detected, detected),
                    (Outcome::Undetected, undetected),
                ]),
                total,
                quality: Some(quality),
            })
        }
        RawCounts::Analysis {
            error,
            high,
            normal,
            low,
        } => {
            let counts = BTreeMap::from([
                (Outcome::Error, non_negative("error", error)?),
                (Outcome::High, non_negative("high", high)?),
                (Outcome::Normal, non_negative("normal", normal)?),
                (Outcome::Low, non_negative("low", low)?),
            ]);
            let total = checked_total(counts.values().copied()).ok_or_else(|| {
                Error::invalid_input("sum of analysis findings does not fit into 64 bits")
            })?;

            Ok(NormalizedCounts {
                counts,
                total,
                quality: None,
            })
        }
    }
}

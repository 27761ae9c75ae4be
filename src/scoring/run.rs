//! A single grading run: score every report record and fan the results into
//! an [`AggregatedScore`].
//!
//! Records that fail scoring are excluded from aggregation and recorded as
//! rejected; the run continues with the remaining records. Logging is left to
//! the caller, which receives the applied deltas.

use super::aggregate::{AggregatedScore, ScoreDelta};
use super::category::CategoryScorer;
use super::records::ReportRecord;
use crate::config::GradingScheme;

/// A record whose category has no configuration section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnconfiguredRecord {
    pub name: String,
    pub category: &'static str,
}

#[derive(Debug, Clone)]
pub struct GradingOutcome {
    pub score: AggregatedScore,
    /// Deltas in the order they were applied
    pub deltas: Vec<ScoreDelta>,
    pub unconfigured: Vec<UnconfiguredRecord>,
}

pub fn grade(scheme: &GradingScheme, records: &[ReportRecord]) -> GradingOutcome {
    let mut score = AggregatedScore::new();
    for configuration in scheme.categories() {
        score.register(configuration);
    }

    let mut deltas = Vec::new();
    let mut unconfigured = Vec::new();

    for record in records {
        let kind = record.counts.kind();
        let Some(configuration) = scheme.get(kind) else {
            unconfigured.push(UnconfiguredRecord {
                name: record.name.clone(),
                category: kind.id(),
            });
            continue;
        };
        if !configuration.is_enabled() {
            continue;
        }

        match CategoryScorer::new(configuration).score(record.name.as_str(), &record.counts) {
            Ok(result) => deltas.extend(score.add_category(result, configuration)),
            Err(e) => score.add_rejected(record.name.as_str(), configuration, e.to_string()),
        }
    }

    GradingOutcome {
        score,
        deltas,
        unconfigured,
    }
}

//! Scoring and aggregation of build quality metrics.
//!
//! Raw per-category counts are turned into signed impacts by
//! [`CategoryScorer`], then summed and capped by [`AggregatedScore`].
//! [`grade`] drives both over a list of report records.

pub mod aggregate;
pub mod category;
pub mod outcome;
pub mod records;
pub mod run;

pub use aggregate::{AggregatedScore, CategoryState, RejectedResult, ScoreDelta};
pub use category::{CategoryResult, CategoryScorer, RawCounts};
pub use outcome::{CategoryKind, Outcome};
pub use records::{FailureDetail, ReportRecord};
pub use run::{grade, GradingOutcome, UnconfiguredRecord};

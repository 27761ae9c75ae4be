// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod io;
pub mod observability;
pub mod output;
pub mod scoring;

// Re-export commonly used types
pub use crate::config::{AggregationMode, GradingConfig, GradingConfiguration, GradingScheme};

pub use crate::errors::{Error, ErrorKind, Result};

pub use crate::scoring::{
    grade, AggregatedScore, CategoryKind, CategoryResult, CategoryScorer, CategoryState,
    FailureDetail, Outcome, RawCounts, ReportRecord, ScoreDelta,
};

pub use crate::output::MarkdownRenderer;

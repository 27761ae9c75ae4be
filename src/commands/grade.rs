use crate::cli::OutputFormat;
use crate::config::{self, GradingScheme};
use crate::io::{FileDestination, GradingInput, OutputDestination, StdoutDestination};
use crate::output;
use crate::scoring::{self, AggregatedScore, GradingOutcome};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info, info_span, warn};

pub struct GradeConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

pub fn handle_grade(config: GradeConfig) -> Result<AggregatedScore> {
    let _span = info_span!("grade", input = %config.input.display()).entered();

    let scheme = load_scheme(config.config.as_ref())?;
    let input = GradingInput::load(&config.input)
        .with_context(|| format!("Failed to load report records from {}", config.input.display()))?;
    debug!(
        reports = input.reports.len(),
        failures = input.failures.len(),
        "Loaded report records"
    );

    let outcome = scoring::grade(&scheme, &input.reports);
    log_outcome(&outcome);

    let format = output::infer_format(config.format, config.output.as_deref());
    let destination: Box<dyn OutputDestination> = match config.output {
        Some(path) => Box::new(FileDestination::new(path)),
        None => Box::new(StdoutDestination::new()),
    };
    output::write_report(&outcome.score, &input.failures, format, destination.as_ref())
        .with_context(|| format!("Failed to write report to {}", destination.description()))?;

    info!(
        achieved = outcome.score.achieved(),
        max_score = outcome.score.max_score(),
        "Grading finished"
    );
    Ok(outcome.score)
}

fn load_scheme(path: Option<&PathBuf>) -> Result<GradingScheme> {
    match path {
        Some(path) => config::load_config_from_path(path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => config::load_config().context("Failed to load configuration"),
    }
}

fn log_outcome(outcome: &GradingOutcome) {
    for delta in &outcome.deltas {
        info!(
            category = delta.id,
            report = %delta.display_name,
            "{} changed score by: {}",
            delta.id,
            delta.delta
        );
    }
    for id in outcome.score.category_ids() {
        for rejected in outcome.score.rejected_for(id) {
            warn!(
                category = id,
                report = %rejected.display_name,
                "Skipping report: {}",
                rejected.reason
            );
        }
    }
    for record in &outcome.unconfigured {
        warn!(
            category = record.category,
            report = %record.name,
            "Skipping report: category is not configured"
        );
    }
}

//! Fan-in of category results into one capped score.
//!
//! Clamping happens once, on the sum over all enabled categories, so a
//! negative impact in one category can be offset by a positive impact in
//! another before the bounds apply.

use super::category::CategoryResult;
use crate::config::GradingConfiguration;
use serde::Serialize;

/// Evaluation state of a registered category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryState {
    /// Configured but switched off; never contributes.
    Disabled,
    /// Enabled, but no report of this category was scored.
    NotFound,
    /// Enabled, and every report of this category was rejected.
    Invalid,
    /// At least one report of this category contributes.
    Evaluated,
}

/// A report that could not be scored and is excluded from aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedResult {
    pub display_name: String,
    pub reason: String,
}

/// The delta one result applied to the aggregate, returned for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDelta {
    pub id: &'static str,
    pub display_name: String,
    pub delta: i64,
}

#[derive(Debug, Clone)]
struct CategoryEntry {
    configuration: GradingConfiguration,
    rejected: Vec<RejectedResult>,
}

/// Aggregated score of one grading run.
///
/// Append-only while the run lasts; `achieved` is derived on every query and
/// always lies in `[0, max_score]`.
#[derive(Debug, Clone, Default)]
pub struct AggregatedScore {
    categories: Vec<CategoryEntry>,
    results: Vec<CategoryResult>,
}

impl AggregatedScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a category so it is reported even without results. The first
    /// registration of an id wins and fixes its display position.
    pub fn register(&mut self, configuration: &GradingConfiguration) {
        if self.entry(configuration.id()).is_none() {
            self.categories.push(CategoryEntry {
                configuration: configuration.clone(),
                rejected: Vec::new(),
            });
        }
    }

    /// Append `result` if its category is enabled.
    ///
    /// Returns the applied delta, or `None` when the category is disabled and
    /// the result was only recorded as not evaluated.
    pub fn add_category(
        &mut self,
        result: CategoryResult,
        configuration: &GradingConfiguration,
    ) -> Option<ScoreDelta> {
        debug_assert_eq!(result.kind(), configuration.kind());
        self.register(configuration);
        if !self.is_enabled(result.id()) {
            return None;
        }

        let delta = ScoreDelta {
            id: result.id(),
            display_name: result.display_name().to_string(),
            delta: result.total_impact(),
        };
        self.results.push(result);
        Some(delta)
    }

    /// Record a report whose scoring failed.
    pub fn add_rejected(
        &mut self,
        display_name: impl Into<String>,
        configuration: &GradingConfiguration,
        reason: impl Into<String>,
    ) {
        self.register(configuration);
        if let Some(entry) = self
            .categories
            .iter_mut()
            .find(|e| e.configuration.id() == configuration.id())
        {
            entry.rejected.push(RejectedResult {
                display_name: display_name.into(),
                reason: reason.into(),
            });
        }
    }

    /// Sum of all impacts, clamped to `[0, max_score()]`.
    pub fn achieved(&self) -> i64 {
        let sum = wide_sum(
            self.results
                .iter()
                .filter(|r| self.is_enabled(r.id()))
                .map(CategoryResult::total_impact),
        );
        clamp_to_score(sum, self.max_score())
    }

    /// Sum of the maximum scores of all enabled categories, saturating at
    /// `i64::MAX`.
    pub fn max_score(&self) -> i64 {
        self.categories
            .iter()
            .filter(|e| e.configuration.is_enabled())
            .map(|e| e.configuration.max_score())
            .fold(0i64, i64::saturating_add)
    }

    /// Results in insertion order, which is also the display order.
    pub fn category_results(&self) -> &[CategoryResult] {
        &self.results
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(CategoryResult::has_failures)
    }

    /// Registered category ids in registration order.
    pub fn category_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|e| e.configuration.id())
    }

    pub fn configuration(&self, id: &str) -> Option<&GradingConfiguration> {
        self.entry(id).map(|e| &e.configuration)
    }

    pub fn category_state(&self, id: &str) -> Option<CategoryState> {
        let entry = self.entry(id)?;
        let state = if !entry.configuration.is_enabled() {
            CategoryState::Disabled
        } else if self.results_for(id).next().is_some() {
            CategoryState::Evaluated
        } else if !entry.rejected.is_empty() {
            CategoryState::Invalid
        } else {
            CategoryState::NotFound
        };
        Some(state)
    }

    pub fn results_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a CategoryResult> + 'a {
        self.results.iter().filter(move |r| r.id() == id)
    }

    pub fn rejected_for(&self, id: &str) -> &[RejectedResult] {
        self.entry(id).map(|e| e.rejected.as_slice()).unwrap_or(&[])
    }

    pub fn category_has_failures(&self, id: &str) -> bool {
        self.results_for(id).any(CategoryResult::has_failures)
    }

    /// Display helper: this category's impacts clamped to its own maximum.
    pub fn category_achieved(&self, id: &str) -> i64 {
        let sum = wide_sum(self.results_for(id).map(CategoryResult::total_impact));
        clamp_to_score(sum, self.category_max_score(id))
    }

    pub fn category_max_score(&self, id: &str) -> i64 {
        self.configuration(id)
            .filter(|c| c.is_enabled())
            .map(GradingConfiguration::max_score)
            .unwrap_or(0)
    }

    fn entry(&self, id: &str) -> Option<&CategoryEntry> {
        self.categories.iter().find(|e| e.configuration.id() == id)
    }

    fn is_enabled(&self, id: &str) -> bool {
        self.configuration(id).is_some_and(GradingConfiguration::is_enabled)
    }
}

/// Sums impacts in `i128`, which cannot overflow for any realistic number of
/// `i64` values.
fn wide_sum(impacts: impl Iterator<Item = i64>) -> i128 {
    impacts.map(i128::from).sum()
}

fn clamp_to_score(sum: i128, max_score: i64) -> i64 {
    // the clamped value lies in [0, max_score], so the narrowing is lossless
    sum.clamp(0, i128::from(max_score)) as i64
}

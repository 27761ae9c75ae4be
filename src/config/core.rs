use serde::{Deserialize, Serialize};

use super::category::{CategoryConfig, GradingConfiguration};
use crate::errors::Result;
use crate::scoring::CategoryKind;

/// Root configuration structure for autograde
///
/// A missing section means the category is not configured at all, which is
/// different from a section with `enabled = false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradingConfig {
    /// Unit test grading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<CategoryConfig>,

    /// Mutation testing grading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutations: Option<CategoryConfig>,

    /// Static analysis grading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<CategoryConfig>,
}

impl GradingConfig {
    /// Configuration with every category enabled at its defaults.
    pub fn with_defaults() -> Self {
        let section = |kind| Some(CategoryConfig::from(&GradingConfiguration::default_for(kind)));
        Self {
            tests: section(CategoryKind::Tests),
            mutations: section(CategoryKind::Mutations),
            analysis: section(CategoryKind::Analysis),
        }
    }

    pub fn section(&self, kind: CategoryKind) -> Option<&CategoryConfig> {
        match kind {
            CategoryKind::Tests => self.tests.as_ref(),
            CategoryKind::Mutations => self.mutations.as_ref(),
            CategoryKind::Analysis => self.analysis.as_ref(),
        }
    }

    /// Validate every present section.
    pub fn resolve(&self) -> Result<GradingScheme> {
        let categories = CategoryKind::ALL
            .into_iter()
            .filter_map(|kind| {
                self.section(kind)
                    .map(|section| section.clone().into_configuration(kind))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(GradingScheme { categories })
    }
}

/// The validated set of category configurations of one grading run, in
/// display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradingScheme {
    categories: Vec<GradingConfiguration>,
}

impl GradingScheme {
    pub fn new(categories: Vec<GradingConfiguration>) -> Self {
        Self { categories }
    }

    pub fn get(&self, kind: CategoryKind) -> Option<&GradingConfiguration> {
        self.categories.iter().find(|c| c.kind() == kind)
    }

    pub fn categories(&self) -> &[GradingConfiguration] {
        &self.categories
    }
}

impl Default for GradingScheme {
    fn default() -> Self {
        Self {
            categories: CategoryKind::ALL
                .into_iter()
                .map(GradingConfiguration::default_for)
                .collect(),
        }
    }
}

use crate::errors::Result;
use crate::scoring::{AggregatedScore, CategoryResult, CategoryState, RejectedResult};
use serde::Serialize;

/// Serializable snapshot of an aggregated score.
#[derive(Debug, Serialize)]
pub struct ScoreSummary<'a> {
    pub achieved: i64,
    pub max_score: i64,
    pub has_failures: bool,
    pub categories: Vec<CategorySummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CategorySummary<'a> {
    pub id: &'static str,
    pub state: CategoryState,
    pub achieved: i64,
    pub max_score: i64,
    pub results: Vec<&'a CategoryResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<&'a RejectedResult>,
}

impl<'a> ScoreSummary<'a> {
    pub fn from_score(score: &'a AggregatedScore) -> Self {
        let categories = score
            .category_ids()
            .filter_map(|id| {
                let state = score.category_state(id)?;
                Some(CategorySummary {
                    id,
                    state,
                    achieved: score.category_achieved(id),
                    max_score: score.category_max_score(id),
                    results: score.results_for(id).collect(),
                    rejected: score.rejected_for(id).iter().collect(),
                })
            })
            .collect();

        Self {
            achieved: score.achieved(),
            max_score: score.max_score(),
            has_failures: score.has_failures(),
            categories,
        }
    }
}

pub fn render_json(score: &AggregatedScore) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ScoreSummary::from_score(score))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GradingConfiguration;
    use crate::scoring::{CategoryKind, CategoryScorer, RawCounts};

    #[test]
    fn test_json_contains_categories_and_totals() {
        let config = GradingConfiguration::default_for(CategoryKind::Mutations);
        let result = CategoryScorer::new(&config)
            .score(
                "PIT",
                &RawCounts::Mutations {
                    total: 50,
                    undetected: 10,
                },
            )
            .unwrap();
        let mut score = AggregatedScore::new();
        score.add_category(result, &config);

        let json: serde_json::Value = serde_json::from_str(&render_json(&score).unwrap()).unwrap();
        assert_eq!(json["achieved"], 20);
        assert_eq!(json["max_score"], 100);
        assert_eq!(json["categories"][0]["id"], "mutations");
        assert_eq!(json["categories"][0]["state"], "evaluated");
        assert_eq!(json["categories"][0]["results"][0]["ratio"], 80.0);
        assert_eq!(json["categories"][0]["results"][0]["counts"]["undetected"], 10);
        assert!(json["categories"][0].get("rejected").is_none());
    }
}

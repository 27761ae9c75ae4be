//! Already-parsed report records consumed by a grading run.

use super::category::RawCounts;
use serde::{Deserialize, Serialize};

/// Counts of one metric report, e.g. one JUnit run or one PIT report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    /// Human-readable name shown in the report table
    pub name: String,
    #[serde(flatten)]
    pub counts: RawCounts,
}

impl ReportRecord {
    pub fn new(name: impl Into<String>, counts: RawCounts) -> Self {
        Self {
            name: name.into(),
            counts,
        }
    }
}

/// One failing unit, e.g. a failing test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Category id the failure belongs to
    #[serde(default = "default_category")]
    pub category: String,
    pub file_name: String,
    #[serde(default)]
    pub line_start: u32,
    pub message: String,
}

fn default_category() -> String {
    "tests".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_record_flattens_counts() {
        let record: ReportRecord = serde_json::from_str(indoc! {r#"
            {"name": "PIT", "kind": "mutations", "total": 50, "undetected": 10}
        "#})
        .unwrap();
        assert_eq!(
            record,
            ReportRecord::new(
                "PIT",
                RawCounts::Mutations {
                    total: 50,
                    undetected: 10
                }
            )
        );
    }

    #[test]
    fn test_failure_detail_defaults_to_tests_category() {
        let detail: FailureDetail = serde_json::from_str(
            r#"{"file_name": "CalculatorTest.java", "line_start": 42, "message": "boom"}"#,
        )
        .unwrap();
        assert_eq!(detail.category, "tests");
        assert_eq!(detail.line_start, 42);
    }
}

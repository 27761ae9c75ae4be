//! Loading of already-parsed report records.

use crate::errors::{Error, Result};
use crate::scoring::{FailureDetail, ReportRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input document of a grading run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingInput {
    #[serde(default)]
    pub reports: Vec<ReportRecord>,
    /// One entry per failing unit, rendered in the failure details
    #[serde(default)]
    pub failures: Vec<FailureDetail>,
}

impl GradingInput {
    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = super::read_file(path)?;
        serde_json::from_str(&contents).map_err(|e| Error::decode(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::scoring::RawCounts;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_from_json_reads_reports_and_failures() {
        let input = GradingInput::from_json(indoc! {r#"
            {
              "reports": [
                {"name": "JUnit", "kind": "tests", "total": 10, "failed": 2, "skipped": 1},
                {"name": "CheckStyle", "kind": "analysis", "high": 3}
              ],
              "failures": [
                {"category": "tests", "file_name": "FooTest.java", "line_start": 12, "message": "expected 1"}
              ]
            }
        "#})
        .unwrap();

        assert_eq!(input.reports.len(), 2);
        assert_eq!(
            input.reports[1].counts,
            RawCounts::Analysis {
                error: 0,
                high: 3,
                normal: 0,
                low: 0
            }
        );
        assert_eq!(input.failures[0].file_name, "FooTest.java");
    }

    #[test]
    fn test_negative_counts_survive_decoding() {
        let input = GradingInput::from_json(
            r#"{"reports": [{"name": "PIT", "kind": "mutations", "total": -1}]}"#,
        )
        .unwrap();
        assert_eq!(
            input.reports[0].counts,
            RawCounts::Mutations {
                total: -1,
                undetected: 0
            }
        );
    }

    #[test]
    fn test_empty_document_has_no_reports() {
        let input = GradingInput::from_json("{}").unwrap();
        assert_eq!(input, GradingInput::default());
    }

    #[test]
    fn test_load_reports_decode_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(&path, r#"{"reports": [{"name": "x", "kind": "coverage"}]}"#).unwrap();

        let err = GradingInput::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().contains("results.json"));
    }

    #[test]
    fn test_from_json_syntax_error_is_decode_error() {
        let err = GradingInput::from_json("{\"reports\": [").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}

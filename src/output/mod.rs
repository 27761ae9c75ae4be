pub mod json;
pub mod markdown;

pub use json::{render_json, CategorySummary, ScoreSummary};
pub use markdown::{MarkdownRenderer, SectionStyle};

use crate::cli::OutputFormat;
use crate::errors::Result;
use crate::io::OutputDestination;
use crate::scoring::{AggregatedScore, FailureDetail};
use std::path::Path;

/// Render `score` in the requested format.
pub fn render(
    score: &AggregatedScore,
    details: &[FailureDetail],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(MarkdownRenderer::new().render(score, details)),
        OutputFormat::Json => render_json(score),
    }
}

/// Render and hand the report to `destination`.
pub fn write_report(
    score: &AggregatedScore,
    details: &[FailureDetail],
    format: OutputFormat,
    destination: &dyn OutputDestination,
) -> Result<()> {
    let content = render(score, details, format)?;
    destination.write_str(&content)?;
    destination.flush()
}

/// Pick the format from the output file extension when none was requested.
pub fn infer_format(requested: Option<OutputFormat>, output_file: Option<&Path>) -> OutputFormat {
    requested.unwrap_or_else(|| {
        let is_json = output_file
            .and_then(|p| p.extension())
            .map(|ext| ext == "json")
            .unwrap_or(false);
        if is_json {
            OutputFormat::Json
        } else {
            OutputFormat::Markdown
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryDestination;
    use std::path::PathBuf;

    #[test]
    fn test_infer_format_prefers_requested() {
        let path = PathBuf::from("report.json");
        assert_eq!(
            infer_format(Some(OutputFormat::Markdown), Some(&path)),
            OutputFormat::Markdown
        );
    }

    #[test]
    fn test_infer_format_from_extension() {
        assert_eq!(
            infer_format(None, Some(&PathBuf::from("score.json"))),
            OutputFormat::Json
        );
        assert_eq!(
            infer_format(None, Some(&PathBuf::from("score.md"))),
            OutputFormat::Markdown
        );
        assert_eq!(infer_format(None, None), OutputFormat::Markdown);
    }

    #[test]
    fn test_write_report_to_memory() {
        let destination = MemoryDestination::new();
        write_report(
            &AggregatedScore::new(),
            &[],
            OutputFormat::Markdown,
            &destination,
        )
        .unwrap();
        assert_eq!(
            destination.get_content(),
            "# :mortar_board: Quality Score: 0 / 0\n"
        );
    }
}

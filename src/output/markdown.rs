//! Markdown rendering of an aggregated score.
//!
//! Rendering is a pure function of its inputs: the same score and detail
//! records always produce byte-identical output.

use crate::scoring::{
    AggregatedScore, CategoryKind, CategoryResult, CategoryState, FailureDetail, Outcome,
};

const COLUMN_WIDTH: usize = 10;

/// Heading text and emoji of a category section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStyle {
    pub title: &'static str,
    pub icon: &'static str,
}

impl SectionStyle {
    pub fn for_kind(kind: CategoryKind) -> Self {
        match kind {
            CategoryKind::Tests => Self {
                title: "Unit Tests Score",
                icon: "vertical_traffic_light",
            },
            CategoryKind::Mutations => Self {
                title: "Mutation Coverage Score",
                icon: "microbe",
            },
            CategoryKind::Analysis => Self {
                title: "Static Analysis Warnings Score",
                icon: "warning",
            },
        }
    }

    fn heading(&self, suffix: &str) -> String {
        format!("## :{}: {}{}\n", self.icon, self.title, suffix)
    }

    pub fn summary(&self, achieved: i64, max_score: i64) -> String {
        self.heading(&format!(": {achieved} / {max_score}"))
    }

    pub fn not_enabled(&self) -> String {
        self.heading(" not enabled")
    }

    pub fn not_found(&self) -> String {
        self.heading(": no results found")
    }

    pub fn invalid(&self) -> String {
        self.heading(": scoring failed")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the whole report: overall score, then one section per category.
    pub fn render(&self, score: &AggregatedScore, details: &[FailureDetail]) -> String {
        let mut out = format!(
            "# :mortar_board: Quality Score: {} / {}\n",
            score.achieved(),
            score.max_score()
        );
        for id in score.category_ids() {
            out.push('\n');
            out.push_str(&self.render_category(score, id, details));
        }
        out
    }

    /// Render the section of one category; empty if `id` is not registered.
    pub fn render_category(
        &self,
        score: &AggregatedScore,
        id: &str,
        details: &[FailureDetail],
    ) -> String {
        let (Some(state), Some(kind)) = (score.category_state(id), CategoryKind::from_id(id)) else {
            return String::new();
        };
        let style = SectionStyle::for_kind(kind);

        match state {
            CategoryState::Disabled => style.not_enabled(),
            CategoryState::NotFound => style.not_found(),
            CategoryState::Invalid => {
                let mut out = style.invalid();
                out.push_str(&render_rejected(score, id));
                out
            }
            CategoryState::Evaluated => {
                let mut out = style.summary(score.category_achieved(id), score.category_max_score(id));
                out.push_str(&render_table(kind, score.results_for(id)));
                out.push_str(&render_rejected(score, id));
                if score.category_has_failures(id) {
                    out.push_str("### Failures\n");
                    details
                        .iter()
                        .filter(|d| d.category == id)
                        .for_each(|d| out.push_str(&render_failure(d)));
                    out.push('\n');
                }
                out
            }
        }
    }
}

fn render_rejected(score: &AggregatedScore, id: &str) -> String {
    score
        .rejected_for(id)
        .iter()
        .map(|r| format!("- {}: {}\n", r.display_name, r.reason))
        .collect()
}

fn header(kind: CategoryKind) -> Vec<String> {
    let mut columns = vec!["Name".to_string()];
    columns.extend(kind.outcomes().iter().map(|o| o.label().to_string()));
    if kind.supports_ratio() {
        columns.push("Ratio".to_string());
    }
    columns.push("Impact".to_string());
    columns
}

fn row(kind: CategoryKind, result: &CategoryResult) -> Vec<String> {
    let mut columns = vec![result.display_name().to_string()];
    columns.extend(
        kind.outcomes()
            .iter()
            .map(|o: &Outcome| result.count(*o).to_string()),
    );
    if kind.supports_ratio() {
        columns.push(format!("{:.0}%", result.ratio().unwrap_or(0.0)));
    }
    columns.push(result.total_impact().to_string());
    columns
}

fn render_table<'a>(kind: CategoryKind, results: impl Iterator<Item = &'a CategoryResult>) -> String {
    let header = header(kind);
    let alignment = vec![":-:".to_string(); header.len()];

    let mut out = format_columns(&header);
    out.push_str(&format_columns(&alignment));
    for result in results {
        out.push_str(&format_columns(&row(kind, result)));
    }
    out
}

fn format_columns(columns: &[String]) -> String {
    let mut line = String::from("|");
    for column in columns {
        line.push_str(&format!("{column:<COLUMN_WIDTH$}|"));
    }
    line.push('\n');
    line
}

/// Collapsible block with the failure message verbatim.
fn render_failure(detail: &FailureDetail) -> String {
    format!(
        "<details>\n<summary>{}({})</summary>\n\n```text\n{}\n```\n</details>\n",
        detail.file_name, detail.line_start, detail.message
    )
}

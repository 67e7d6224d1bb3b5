//! Matrix exporter - JSON, CSV, HTML, and Markdown renditions.
//!
//! Every format walks the snapshot in index order and never re-sorts, so
//! exporting unchanged input twice produces byte-identical output.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::HypothesisScore;
use crate::domain::foundation::DomainError;
use crate::domain::matrix::{MatrixSnapshot, RatingCell};

use super::ExportFormat;

/// Full-fidelity export payload: the snapshot plus one score set.
///
/// The JSON format is the serde representation of this struct; its field
/// names and ordering are part of the export contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub matrix: MatrixSnapshot,
    pub scores: Vec<HypothesisScore>,
}

/// Serializes a snapshot and scores into one of the interchange formats.
pub struct MatrixExporter;

impl MatrixExporter {
    /// Renders the snapshot and scores in the requested format.
    pub fn export(
        snapshot: &MatrixSnapshot,
        scores: &[HypothesisScore],
        format: ExportFormat,
    ) -> Result<String, DomainError> {
        Ok(match format {
            ExportFormat::Json => Self::to_json(snapshot, scores)?,
            ExportFormat::Csv => Self::to_csv(snapshot, scores),
            ExportFormat::Html => Self::to_html(snapshot, scores),
            ExportFormat::Markdown => Self::to_markdown(snapshot, scores),
        })
    }

    /// Full-fidelity JSON, including raw ids.
    pub fn to_json(
        snapshot: &MatrixSnapshot,
        scores: &[HypothesisScore],
    ) -> Result<String, DomainError> {
        let document = ExportDocument {
            matrix: snapshot.clone(),
            scores: scores.to_vec(),
        };
        serde_json::to_string_pretty(&document).map_err(|e| {
            DomainError::new(
                crate::domain::foundation::ErrorCode::InternalError,
                format!("JSON export failed: {}", e),
            )
        })
    }

    /// Flattened rating grid plus a trailing scores section.
    pub fn to_csv(snapshot: &MatrixSnapshot, scores: &[HypothesisScore]) -> String {
        let mut out = String::new();

        let mut header = vec![
            "Evidence".to_string(),
            "Type".to_string(),
            "Credibility".to_string(),
            "Relevance".to_string(),
        ];
        header.extend(snapshot.hypotheses.iter().map(|h| h.title().to_string()));
        out.push_str(&csv_row(&header));

        for evidence in &snapshot.evidence {
            let mut row = vec![
                evidence.description().to_string(),
                evidence.evidence_type().name().to_string(),
                evidence.credibility().value().to_string(),
                evidence.relevance().value().to_string(),
            ];
            for hypothesis in &snapshot.hypotheses {
                row.push(
                    snapshot
                        .rating(evidence.id(), hypothesis.id())
                        .map(|c| c.consistency.symbol().to_string())
                        .unwrap_or_default(),
                );
            }
            out.push_str(&csv_row(&row));
        }

        out.push('\n');
        out.push_str(&csv_row(&[
            "Hypothesis".to_string(),
            "Inconsistency Count".to_string(),
            "Weighted Score".to_string(),
            "Normalized Score".to_string(),
            "Rank".to_string(),
        ]));
        for score in scores {
            let title = snapshot
                .hypothesis(&score.hypothesis_id)
                .map(|h| h.title().to_string())
                .unwrap_or_else(|| score.hypothesis_id.to_string());
            out.push_str(&csv_row(&[
                title,
                score.inconsistency_count.to_string(),
                score.weighted_score.to_string(),
                score.normalized_score.to_string(),
                score.rank.to_string(),
            ]));
        }

        out
    }

    /// Standalone HTML document with sign-coded rating cells.
    pub fn to_html(snapshot: &MatrixSnapshot, scores: &[HypothesisScore]) -> String {
        let mut grid = String::new();

        grid.push_str("<table>\n<thead>\n<tr><th>Evidence</th><th>Type</th><th>Credibility</th><th>Relevance</th>");
        for hypothesis in &snapshot.hypotheses {
            grid.push_str(&format!("<th>{}</th>", html_escape(hypothesis.title())));
        }
        grid.push_str("</tr>\n</thead>\n<tbody>\n");

        for evidence in &snapshot.evidence {
            grid.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
                html_escape(evidence.description()),
                html_escape(evidence.evidence_type().name()),
                evidence.credibility().value(),
                evidence.relevance().value(),
            ));
            for hypothesis in &snapshot.hypotheses {
                match snapshot.rating(evidence.id(), hypothesis.id()) {
                    Some(cell) => grid.push_str(&format!(
                        "<td class=\"{}\">{}</td>",
                        rating_class(cell),
                        html_escape(cell.consistency.symbol()),
                    )),
                    None => grid.push_str("<td class=\"unrated\"></td>"),
                }
            }
            grid.push_str("</tr>\n");
        }
        grid.push_str("</tbody>\n</table>\n");

        grid.push_str("<h2>Scores</h2>\n<table>\n<thead>\n<tr><th>Hypothesis</th><th>Inconsistency Count</th><th>Weighted Score</th><th>Normalized Score</th><th>Rank</th></tr>\n</thead>\n<tbody>\n");
        for score in scores {
            let title = snapshot
                .hypothesis(&score.hypothesis_id)
                .map(|h| h.title().to_string())
                .unwrap_or_else(|| score.hypothesis_id.to_string());
            grid.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                html_escape(&title),
                score.inconsistency_count,
                score.weighted_score,
                score.normalized_score,
                score.rank,
            ));
        }
        grid.push_str("</tbody>\n</table>\n");

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <article class="ach-matrix">
<h1>{title}</h1>
{grid}    </article>
</body>
</html>"#,
            title = html_escape(&snapshot.title),
            css = MATRIX_CSS,
            grid = grid,
        )
    }

    /// Markdown rendition using pipe tables.
    pub fn to_markdown(snapshot: &MatrixSnapshot, scores: &[HypothesisScore]) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", md_escape(&snapshot.title)));
        if !snapshot.description.is_empty() {
            out.push_str(&format!("{}\n\n", md_escape(&snapshot.description)));
        }

        out.push_str("## Ratings\n\n");
        let mut header = vec![
            "Evidence".to_string(),
            "Type".to_string(),
            "Credibility".to_string(),
            "Relevance".to_string(),
        ];
        header.extend(snapshot.hypotheses.iter().map(|h| md_escape(h.title())));
        out.push_str(&md_row(&header));
        out.push_str(&md_divider(header.len()));

        for evidence in &snapshot.evidence {
            let mut row = vec![
                md_escape(evidence.description()),
                md_escape(evidence.evidence_type().name()),
                evidence.credibility().value().to_string(),
                evidence.relevance().value().to_string(),
            ];
            for hypothesis in &snapshot.hypotheses {
                row.push(
                    snapshot
                        .rating(evidence.id(), hypothesis.id())
                        .map(|c| c.consistency.symbol().to_string())
                        .unwrap_or_default(),
                );
            }
            out.push_str(&md_row(&row));
        }

        out.push_str("\n## Scores\n\n");
        let score_header = [
            "Hypothesis".to_string(),
            "Inconsistency Count".to_string(),
            "Weighted Score".to_string(),
            "Normalized Score".to_string(),
            "Rank".to_string(),
        ];
        out.push_str(&md_row(&score_header));
        out.push_str(&md_divider(score_header.len()));
        for score in scores {
            let title = snapshot
                .hypothesis(&score.hypothesis_id)
                .map(|h| md_escape(h.title()))
                .unwrap_or_else(|| score.hypothesis_id.to_string());
            out.push_str(&md_row(&[
                title,
                score.inconsistency_count.to_string(),
                score.weighted_score.to_string(),
                score.normalized_score.to_string(),
                score.rank.to_string(),
            ]));
        }

        out
    }
}

/// CSS class for a rating cell, keyed by weight sign.
fn rating_class(cell: &RatingCell) -> &'static str {
    match cell.weight() {
        Some(w) if w > 0 => "consistent",
        Some(w) if w < 0 => "inconsistent",
        Some(_) => "neutral",
        None => "na",
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_row(fields: &[String]) -> String {
    let escaped: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
    format!("{}\n", escaped.join(","))
}

/// Escape pipes so table cells cannot break the layout.
fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

fn md_row(cells: &[String]) -> String {
    format!("| {} |\n", cells.join(" | "))
}

fn md_divider(columns: usize) -> String {
    format!("|{}\n", "---|".repeat(columns))
}

const MATRIX_CSS: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;
    color: #1f2937;
    max-width: 1100px;
    margin: 0 auto;
    padding: 2rem;
}

table {
    width: 100%;
    border-collapse: collapse;
    margin: 1em 0;
}

th, td {
    padding: 0.5rem;
    text-align: left;
    border: 1px solid #e5e7eb;
}

th {
    background-color: #f3f4f6;
    font-weight: 600;
}

td.consistent {
    background-color: #dcfce7;
    text-align: center;
}

td.inconsistent {
    background-color: #fee2e2;
    text-align: center;
}

td.neutral {
    background-color: #f3f4f6;
    text-align: center;
}

td.na, td.unrated {
    color: #9ca3af;
    text-align: center;
}
"#;

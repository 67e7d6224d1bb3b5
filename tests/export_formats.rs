//! Export contract tests: fidelity, determinism, and format dispatch.

use ach_workbench::domain::analysis::{HypothesisScore, ScoringEngine};
use ach_workbench::domain::export::{ExportDocument, ExportFormat, MatrixExporter};
use ach_workbench::domain::foundation::{Consistency, ErrorCode, EvidenceType, UnitScore};
use ach_workbench::domain::matrix::{Matrix, MatrixSnapshot};

fn score(value: f64) -> UnitScore {
    UnitScore::try_new("score", value).unwrap()
}

fn populated() -> (MatrixSnapshot, Vec<HypothesisScore>) {
    let mut m = Matrix::new("Export inquiry", "serialization checks").unwrap();
    let h1 = *m.add_hypothesis("Insider", "disgruntled employee").unwrap().id();
    let h2 = *m.add_hypothesis("Intrusion", "external compromise").unwrap().id();
    let e1 = *m
        .add_evidence(
            "Badge swipe at 02:14",
            Some("facility logs".to_string()),
            EvidenceType::Document,
            score(0.9),
            score(0.8),
        )
        .unwrap()
        .id();
    let e2 = *m
        .add_evidence(
            "No perimeter alerts",
            None,
            EvidenceType::Circumstantial,
            score(0.6),
            score(0.7),
        )
        .unwrap()
        .id();
    m.set_rating(
        &e1,
        &h1,
        Consistency::StronglyConsistent,
        Some("badge belongs to the suspect".to_string()),
        score(0.9),
    )
    .unwrap();
    m.set_rating(&e1, &h2, Consistency::Inconsistent, None, score(0.8))
        .unwrap();
    m.set_rating(&e2, &h2, Consistency::Inconsistent, None, score(0.7))
        .unwrap();

    let snapshot = m.snapshot();
    let scores = ScoringEngine::score(&snapshot).unwrap();
    (snapshot, scores)
}

#[test]
fn json_export_roundtrips_exactly() {
    let (snapshot, scores) = populated();

    let json = MatrixExporter::export(&snapshot, &scores, ExportFormat::Json).unwrap();
    let document: ExportDocument = serde_json::from_str(&json).unwrap();

    assert_eq!(document.matrix, snapshot);
    assert_eq!(document.scores, scores);
    // Ids, values, and order all survive.
    assert_eq!(
        document.matrix.hypotheses[0].id(),
        snapshot.hypotheses[0].id()
    );
    assert_eq!(document.matrix.ratings, snapshot.ratings);
}

#[test]
fn csv_export_is_byte_identical_across_calls() {
    let (snapshot, scores) = populated();

    let first = MatrixExporter::export(&snapshot, &scores, ExportFormat::Csv).unwrap();
    let second = MatrixExporter::export(&snapshot, &scores, ExportFormat::Csv).unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn every_format_is_deterministic() {
    let (snapshot, scores) = populated();

    for format in [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Html,
        ExportFormat::Markdown,
    ] {
        let first = MatrixExporter::export(&snapshot, &scores, format).unwrap();
        let second = MatrixExporter::export(&snapshot, &scores, format).unwrap();
        assert_eq!(first, second, "{} export must be deterministic", format);
    }
}

#[test]
fn grid_order_follows_matrix_indices() {
    let (snapshot, scores) = populated();

    let csv = MatrixExporter::export(&snapshot, &scores, ExportFormat::Csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    // Header then evidence rows in row order.
    assert!(lines[0].starts_with("Evidence,Type,Credibility,Relevance,Insider,Intrusion"));
    assert!(lines[1].starts_with("Badge swipe at 02:14"));
    assert!(lines[2].starts_with("No perimeter alerts"));

    let md = MatrixExporter::export(&snapshot, &scores, ExportFormat::Markdown).unwrap();
    let badge = md.find("Badge swipe at 02:14").unwrap();
    let alerts = md.find("No perimeter alerts").unwrap();
    assert!(badge < alerts);
}

#[test]
fn unknown_format_name_is_rejected() {
    let err = "pdf".parse::<ExportFormat>().unwrap_err();
    assert_eq!(err.code, ErrorCode::UnsupportedFormat);
}

#[test]
fn empty_matrix_exports_in_every_format() {
    let m = Matrix::new("Empty", "").unwrap();
    let snapshot = m.snapshot();

    for format in [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Html,
        ExportFormat::Markdown,
    ] {
        let output = MatrixExporter::export(&snapshot, &[], format).unwrap();
        assert!(!output.is_empty());
    }
}

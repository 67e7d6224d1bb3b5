//! Diagnosticity Analyzer - which evidence differentiates the hypotheses.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::foundation::EvidenceId;
use crate::domain::matrix::MatrixSnapshot;

/// Default dispersion threshold splitting high from low diagnosticity.
///
/// A one-step spread across two hypotheses yields a variance of 0.25.
pub const DEFAULT_DISPERSION_THRESHOLD: f64 = 0.25;

/// Diagnosticity classification for one evidence row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticityClass {
    /// The ratings vary enough across hypotheses to discriminate.
    High,
    /// The ratings are uniform or nearly so; the evidence does not help
    /// choose between hypotheses, however strong it feels.
    Low,
    /// Rated against fewer than two hypotheses; no dispersion to measure.
    InsufficientlyRated,
}

/// Dispersion result for one evidence row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDiagnosticity {
    pub evidence_id: EvidenceId,
    /// Population variance of the rating weights across rated hypotheses.
    pub dispersion: f64,
    /// Number of hypotheses with an applicable (non-`N/A`) rating.
    pub rated_hypotheses: usize,
    pub classification: DiagnosticityClass,
}

/// Identifies the evidence rows that best differentiate hypotheses.
pub struct DiagnosticityAnalyzer;

impl DiagnosticityAnalyzer {
    /// Computes weight dispersion per evidence row.
    ///
    /// Rows rated against fewer than two hypotheses are reported as
    /// insufficiently rated instead of scored. Output is ordered by
    /// dispersion descending, with insufficiently-rated rows last; ties
    /// keep row order.
    pub fn analyze(snapshot: &MatrixSnapshot, threshold: f64) -> Vec<EvidenceDiagnosticity> {
        let mut results: Vec<EvidenceDiagnosticity> = snapshot
            .evidence
            .iter()
            .map(|evidence| {
                let weights: Vec<f64> = snapshot
                    .ratings_for_evidence(evidence.id())
                    .iter()
                    .filter_map(|cell| cell.weight())
                    .map(f64::from)
                    .collect();

                if weights.len() < 2 {
                    return EvidenceDiagnosticity {
                        evidence_id: *evidence.id(),
                        dispersion: 0.0,
                        rated_hypotheses: weights.len(),
                        classification: DiagnosticityClass::InsufficientlyRated,
                    };
                }

                let dispersion = population_variance(&weights);
                let classification = if dispersion >= threshold {
                    DiagnosticityClass::High
                } else {
                    DiagnosticityClass::Low
                };

                EvidenceDiagnosticity {
                    evidence_id: *evidence.id(),
                    dispersion,
                    rated_hypotheses: weights.len(),
                    classification,
                }
            })
            .collect();

        // Stable sort keeps row order within equal dispersion.
        results.sort_by(|a, b| {
            let a_scored = a.classification != DiagnosticityClass::InsufficientlyRated;
            let b_scored = b.classification != DiagnosticityClass::InsufficientlyRated;
            b_scored
                .cmp(&a_scored)
                .then(b.dispersion.partial_cmp(&a.dispersion).unwrap_or(Ordering::Equal))
        });

        results
    }
}

fn population_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Consistency, EvidenceType, UnitScore};
    use crate::domain::matrix::Matrix;

    fn score(value: f64) -> UnitScore {
        UnitScore::try_new("score", value).unwrap()
    }

    fn analyze(m: &Matrix) -> Vec<EvidenceDiagnosticity> {
        DiagnosticityAnalyzer::analyze(&m.snapshot(), DEFAULT_DISPERSION_THRESHOLD)
    }

    #[test]
    fn uniform_ratings_are_low_diagnosticity() {
        let mut m = Matrix::new("Uniform", "").unwrap();
        let h1 = *m.add_hypothesis("H1", "").unwrap().id();
        let h2 = *m.add_hypothesis("H2", "").unwrap().id();
        let e1 = *m
            .add_evidence("E1", None, EvidenceType::Fact, score(1.0), score(1.0))
            .unwrap()
            .id();
        m.set_rating(&e1, &h1, Consistency::Consistent, None, score(1.0))
            .unwrap();
        m.set_rating(&e1, &h2, Consistency::Consistent, None, score(1.0))
            .unwrap();

        let results = analyze(&m);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].dispersion, 0.0);
        assert_eq!(results[0].classification, DiagnosticityClass::Low);
    }

    #[test]
    fn opposing_ratings_are_high_diagnosticity() {
        let mut m = Matrix::new("Opposing", "").unwrap();
        let h1 = *m.add_hypothesis("H1", "").unwrap().id();
        let h2 = *m.add_hypothesis("H2", "").unwrap().id();
        let e1 = *m
            .add_evidence("E1", None, EvidenceType::Fact, score(1.0), score(1.0))
            .unwrap()
            .id();
        m.set_rating(&e1, &h1, Consistency::StronglyConsistent, None, score(1.0))
            .unwrap();
        m.set_rating(&e1, &h2, Consistency::StronglyInconsistent, None, score(1.0))
            .unwrap();

        let results = analyze(&m);
        // Weights 2 and -2: variance 4.
        assert_eq!(results[0].dispersion, 4.0);
        assert_eq!(results[0].classification, DiagnosticityClass::High);
        assert_eq!(results[0].rated_hypotheses, 2);
    }

    #[test]
    fn single_rating_is_insufficiently_rated() {
        let mut m = Matrix::new("Sparse", "").unwrap();
        let h1 = *m.add_hypothesis("H1", "").unwrap().id();
        m.add_hypothesis("H2", "").unwrap();
        let e1 = *m
            .add_evidence("E1", None, EvidenceType::Fact, score(1.0), score(1.0))
            .unwrap()
            .id();
        m.set_rating(&e1, &h1, Consistency::Consistent, None, score(1.0))
            .unwrap();

        let results = analyze(&m);
        assert_eq!(
            results[0].classification,
            DiagnosticityClass::InsufficientlyRated
        );
        assert_eq!(results[0].rated_hypotheses, 1);
    }

    #[test]
    fn not_applicable_ratings_do_not_count_as_rated() {
        let mut m = Matrix::new("NA", "").unwrap();
        let h1 = *m.add_hypothesis("H1", "").unwrap().id();
        let h2 = *m.add_hypothesis("H2", "").unwrap().id();
        let e1 = *m
            .add_evidence("E1", None, EvidenceType::Fact, score(1.0), score(1.0))
            .unwrap()
            .id();
        m.set_rating(&e1, &h1, Consistency::Consistent, None, score(1.0))
            .unwrap();
        m.set_rating(&e1, &h2, Consistency::NotApplicable, None, score(1.0))
            .unwrap();

        let results = analyze(&m);
        assert_eq!(
            results[0].classification,
            DiagnosticityClass::InsufficientlyRated
        );
    }

    #[test]
    fn output_is_ordered_by_dispersion_descending() {
        let mut m = Matrix::new("Ordering", "").unwrap();
        let h1 = *m.add_hypothesis("H1", "").unwrap().id();
        let h2 = *m.add_hypothesis("H2", "").unwrap().id();

        let flat = *m
            .add_evidence("flat", None, EvidenceType::Fact, score(1.0), score(1.0))
            .unwrap()
            .id();
        let sharp = *m
            .add_evidence("sharp", None, EvidenceType::Fact, score(1.0), score(1.0))
            .unwrap()
            .id();
        let unrated = *m
            .add_evidence("unrated", None, EvidenceType::Fact, score(1.0), score(1.0))
            .unwrap()
            .id();

        m.set_rating(&flat, &h1, Consistency::Neutral, None, score(1.0))
            .unwrap();
        m.set_rating(&flat, &h2, Consistency::Neutral, None, score(1.0))
            .unwrap();
        m.set_rating(&sharp, &h1, Consistency::StronglyConsistent, None, score(1.0))
            .unwrap();
        m.set_rating(&sharp, &h2, Consistency::StronglyInconsistent, None, score(1.0))
            .unwrap();

        let results = analyze(&m);
        let order: Vec<_> = results.iter().map(|r| r.evidence_id).collect();
        assert_eq!(order, vec![sharp, flat, unrated]);
    }

    #[test]
    fn empty_matrix_yields_no_results() {
        let m = Matrix::new("Empty", "").unwrap();
        assert!(analyze(&m).is_empty());
    }
}

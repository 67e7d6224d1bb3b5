//! Sensitivity Analyzer - robustness of the ranking to weak evidence.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EvidenceId, HypothesisId};
use crate::domain::matrix::MatrixSnapshot;

use super::{HypothesisScore, ScoringEngine};

/// Default credibility threshold below which evidence is excluded.
pub const DEFAULT_CREDIBILITY_THRESHOLD: f64 = 0.5;

/// A hypothesis whose rank differs between the two runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankChange {
    pub hypothesis_id: HypothesisId,
    pub baseline_rank: usize,
    pub filtered_rank: usize,
}

/// Outcome of comparing the baseline ranking with the filtered one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub credibility_threshold: f64,
    pub baseline_lead: HypothesisId,
    pub filtered_lead: HypothesisId,
    pub lead_changed: bool,
    pub rank_changes: Vec<RankChange>,
    /// Evidence excluded by the threshold, in row order.
    pub excluded_evidence: Vec<EvidenceId>,
    pub baseline_scores: Vec<HypothesisScore>,
    pub filtered_scores: Vec<HypothesisScore>,
}

/// Tests how robust the ranking is to removing low-credibility evidence.
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// Recomputes the ranking with and without low-credibility evidence.
    ///
    /// Evidence whose credibility is strictly below the threshold is
    /// excluded from the second run; a threshold of 0.0 excludes nothing
    /// and must report identical rankings. The store is never touched;
    /// both runs operate on derived snapshots.
    ///
    /// # Errors
    ///
    /// - `EmptyMatrix` if the snapshot has no hypotheses
    pub fn analyze(
        snapshot: &MatrixSnapshot,
        credibility_threshold: f64,
    ) -> Result<SensitivityReport, DomainError> {
        let baseline_scores = ScoringEngine::score(snapshot)?;

        let excluded_evidence: Vec<EvidenceId> = snapshot
            .evidence
            .iter()
            .filter(|e| e.credibility().is_below(credibility_threshold))
            .map(|e| *e.id())
            .collect();

        let filtered_snapshot =
            snapshot.retain_evidence(|e| !e.credibility().is_below(credibility_threshold));
        let filtered_scores = ScoringEngine::score(&filtered_snapshot)?;

        let baseline_lead =
            ScoringEngine::lead(&baseline_scores).expect("non-empty score set has a lead");
        let filtered_lead =
            ScoringEngine::lead(&filtered_scores).expect("non-empty score set has a lead");

        let mut rank_changes: Vec<RankChange> = baseline_scores
            .iter()
            .filter_map(|baseline| {
                let filtered = filtered_scores
                    .iter()
                    .find(|f| f.hypothesis_id == baseline.hypothesis_id)?;
                (filtered.rank != baseline.rank).then(|| RankChange {
                    hypothesis_id: baseline.hypothesis_id,
                    baseline_rank: baseline.rank,
                    filtered_rank: filtered.rank,
                })
            })
            .collect();
        rank_changes.sort_by_key(|c| c.baseline_rank);

        Ok(SensitivityReport {
            credibility_threshold,
            baseline_lead,
            filtered_lead,
            lead_changed: baseline_lead != filtered_lead,
            rank_changes,
            excluded_evidence,
            baseline_scores,
            filtered_scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Consistency, ErrorCode, EvidenceType, UnitScore};
    use crate::domain::matrix::Matrix;

    fn score(value: f64) -> UnitScore {
        UnitScore::try_new("score", value).unwrap()
    }

    #[test]
    fn zero_threshold_reports_identical_rankings() {
        let mut m = Matrix::new("Stable", "").unwrap();
        let h1 = *m.add_hypothesis("H1", "").unwrap().id();
        let h2 = *m.add_hypothesis("H2", "").unwrap().id();
        let e1 = *m
            .add_evidence("E1", None, EvidenceType::Fact, score(0.2), score(1.0))
            .unwrap()
            .id();
        m.set_rating(&e1, &h1, Consistency::Consistent, None, score(1.0))
            .unwrap();
        m.set_rating(&e1, &h2, Consistency::Inconsistent, None, score(1.0))
            .unwrap();

        let report = SensitivityAnalyzer::analyze(&m.snapshot(), 0.0).unwrap();

        assert!(!report.lead_changed);
        assert!(report.rank_changes.is_empty());
        assert!(report.excluded_evidence.is_empty());
        assert_eq!(report.baseline_scores, report.filtered_scores);
    }

    #[test]
    fn low_credibility_evidence_is_excluded() {
        let mut m = Matrix::new("Filter", "").unwrap();
        m.add_hypothesis("H1", "").unwrap();
        let weak = *m
            .add_evidence("weak", None, EvidenceType::Testimony, score(0.2), score(1.0))
            .unwrap()
            .id();
        m.add_evidence("strong", None, EvidenceType::Fact, score(0.9), score(1.0))
            .unwrap();

        let report =
            SensitivityAnalyzer::analyze(&m.snapshot(), DEFAULT_CREDIBILITY_THRESHOLD).unwrap();
        assert_eq!(report.excluded_evidence, vec![weak]);
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let mut m = Matrix::new("Boundary", "").unwrap();
        m.add_hypothesis("H1", "").unwrap();
        m.add_evidence("exactly at", None, EvidenceType::Fact, score(0.5), score(1.0))
            .unwrap();

        let report = SensitivityAnalyzer::analyze(&m.snapshot(), 0.5).unwrap();
        assert!(report.excluded_evidence.is_empty());
    }

    #[test]
    fn lead_change_is_detected() {
        // H1 leads only because of a low-credibility rating against H2.
        let mut m = Matrix::new("Flip", "").unwrap();
        let h1 = *m.add_hypothesis("H1", "").unwrap().id();
        let h2 = *m.add_hypothesis("H2", "").unwrap().id();
        let weak = *m
            .add_evidence("weak", None, EvidenceType::Testimony, score(0.3), score(1.0))
            .unwrap()
            .id();
        let strong = *m
            .add_evidence("strong", None, EvidenceType::Fact, score(0.9), score(1.0))
            .unwrap()
            .id();

        m.set_rating(&weak, &h2, Consistency::StronglyInconsistent, None, score(1.0))
            .unwrap();
        m.set_rating(&strong, &h2, Consistency::StronglyConsistent, None, score(1.0))
            .unwrap();
        m.set_rating(&strong, &h1, Consistency::Consistent, None, score(1.0))
            .unwrap();

        let report = SensitivityAnalyzer::analyze(&m.snapshot(), 0.5).unwrap();

        assert_eq!(report.baseline_lead, h1);
        assert_eq!(report.filtered_lead, h2);
        assert!(report.lead_changed);
        assert_eq!(report.rank_changes.len(), 2);
        assert_eq!(report.excluded_evidence, vec![weak]);
    }

    #[test]
    fn empty_matrix_fails() {
        let m = Matrix::new("Empty", "").unwrap();
        let err = SensitivityAnalyzer::analyze(&m.snapshot(), 0.5).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyMatrix);
    }
}

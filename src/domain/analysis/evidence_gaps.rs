//! Evidence Gap Analyzer - where the analysis is weakest.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Consistency, EvidenceId, EvidenceType, HypothesisId};
use crate::domain::matrix::MatrixSnapshot;

/// Tunables for the gap checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapConfig {
    /// Minimum substantive (non-`N/A`, non-`N`) ratings per hypothesis.
    pub min_ratings: usize,
    /// Credibility/relevance below this counts as low quality.
    pub low_quality_threshold: f64,
    /// Proportion of low-quality evidence that triggers a finding.
    pub quality_concern_ratio: f64,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            min_ratings: 3,
            low_quality_threshold: 0.5,
            quality_concern_ratio: 0.5,
        }
    }
}

/// Which check produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    UnderEvidencedHypothesis,
    MissingEvidenceTypes,
    UnratedEvidence,
    QualityConcern,
}

/// One weakness surfaced by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapFinding {
    pub kind: GapKind,
    pub hypothesis_ids: Vec<HypothesisId>,
    pub evidence_ids: Vec<EvidenceId>,
    pub missing_types: Vec<EvidenceType>,
    pub detail: String,
}

impl GapFinding {
    fn new(kind: GapKind, detail: String) -> Self {
        Self {
            kind,
            hypothesis_ids: Vec::new(),
            evidence_ids: Vec::new(),
            missing_types: Vec::new(),
            detail,
        }
    }
}

/// Flags under-evidenced hypotheses and missing evidence coverage.
pub struct EvidenceGapAnalyzer;

impl EvidenceGapAnalyzer {
    /// Runs all four checks independently against the snapshot.
    ///
    /// Findings come out in check order (under-evidenced, missing types,
    /// unrated evidence, quality concern), each in matrix index order.
    pub fn analyze(snapshot: &MatrixSnapshot, config: &GapConfig) -> Vec<GapFinding> {
        let mut findings = Vec::new();
        findings.extend(Self::under_evidenced(snapshot, config));
        findings.extend(Self::missing_types(snapshot));
        findings.extend(Self::unrated_evidence(snapshot));
        findings.extend(Self::quality_concern(snapshot, config));
        findings
    }

    /// Check (a): hypotheses with too few substantive ratings.
    ///
    /// `N/A` marks evidence that does not bear on the hypothesis and `N`
    /// adds no discriminating information, so neither counts.
    fn under_evidenced(snapshot: &MatrixSnapshot, config: &GapConfig) -> Vec<GapFinding> {
        snapshot
            .hypotheses
            .iter()
            .filter_map(|hypothesis| {
                let substantive = snapshot
                    .ratings_for_hypothesis(hypothesis.id())
                    .iter()
                    .filter(|cell| {
                        cell.consistency.is_applicable()
                            && cell.consistency != Consistency::Neutral
                    })
                    .count();

                (substantive < config.min_ratings).then(|| {
                    let mut finding = GapFinding::new(
                        GapKind::UnderEvidencedHypothesis,
                        format!(
                            "Hypothesis '{}' has {} substantive ratings (minimum {})",
                            hypothesis.title(),
                            substantive,
                            config.min_ratings
                        ),
                    );
                    finding.hypothesis_ids.push(*hypothesis.id());
                    finding
                })
            })
            .collect()
    }

    /// Check (b): core evidence-type categories absent from the matrix.
    fn missing_types(snapshot: &MatrixSnapshot) -> Vec<GapFinding> {
        let missing: Vec<EvidenceType> = EvidenceType::CORE
            .iter()
            .filter(|t| !snapshot.evidence.iter().any(|e| e.evidence_type() == *t))
            .cloned()
            .collect();

        if missing.is_empty() {
            return Vec::new();
        }

        let names: Vec<&str> = missing.iter().map(|t| t.name()).collect();
        let mut finding = GapFinding::new(
            GapKind::MissingEvidenceTypes,
            format!("No evidence of type: {}", names.join(", ")),
        );
        finding.missing_types = missing;
        vec![finding]
    }

    /// Check (c): evidence with no rating against any hypothesis.
    fn unrated_evidence(snapshot: &MatrixSnapshot) -> Vec<GapFinding> {
        snapshot
            .evidence
            .iter()
            .filter(|evidence| snapshot.ratings_for_evidence(evidence.id()).is_empty())
            .map(|evidence| {
                let mut finding = GapFinding::new(
                    GapKind::UnratedEvidence,
                    format!("Evidence '{}' is not rated against any hypothesis", evidence.description()),
                );
                finding.evidence_ids.push(*evidence.id());
                finding
            })
            .collect()
    }

    /// Check (d): matrix-wide proportion of low-quality evidence.
    fn quality_concern(snapshot: &MatrixSnapshot, config: &GapConfig) -> Vec<GapFinding> {
        if snapshot.evidence.is_empty() {
            return Vec::new();
        }

        let low: Vec<EvidenceId> = snapshot
            .evidence
            .iter()
            .filter(|e| {
                e.credibility().is_below(config.low_quality_threshold)
                    || e.relevance().is_below(config.low_quality_threshold)
            })
            .map(|e| *e.id())
            .collect();

        let proportion = low.len() as f64 / snapshot.evidence.len() as f64;
        if proportion <= config.quality_concern_ratio {
            return Vec::new();
        }

        let mut finding = GapFinding::new(
            GapKind::QualityConcern,
            format!(
                "{} of {} evidence items have low credibility or relevance",
                low.len(),
                snapshot.evidence.len()
            ),
        );
        finding.evidence_ids = low;
        vec![finding]
    }
}

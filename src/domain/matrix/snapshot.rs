//! MatrixSnapshot - the immutable view consumed by analyzers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{
    Consistency, EvidenceId, HypothesisId, MatrixId, MatrixStatus, Timestamp, UnitScore,
};

use super::{Evidence, Hypothesis, Matrix};

/// One rated (evidence, hypothesis) cell of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCell {
    pub evidence_id: EvidenceId,
    pub hypothesis_id: HypothesisId,
    pub consistency: Consistency,
    pub reasoning: Option<String>,
    pub confidence: UnitScore,
}

impl RatingCell {
    /// Returns the numeric weight, None for `N/A`.
    pub fn weight(&self) -> Option<i8> {
        self.consistency.weight()
    }
}

/// Fully-populated, immutable view of a matrix.
///
/// Hypotheses are in column order, evidence in row order, and rating cells
/// in (row, column) order, so every walk over the snapshot is
/// deterministic. Unrated pairs simply have no cell; that absence is
/// distinct from a `Neutral` rating and is preserved by every analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSnapshot {
    pub matrix_id: MatrixId,
    pub title: String,
    pub description: String,
    pub status: MatrixStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub hypotheses: Vec<Hypothesis>,
    pub evidence: Vec<Evidence>,
    pub ratings: Vec<RatingCell>,
}

impl MatrixSnapshot {
    /// Builds the snapshot view of a matrix.
    pub(crate) fn from_matrix(matrix: &Matrix) -> Self {
        let mut ratings = Vec::with_capacity(matrix.rating_count());
        for evidence in matrix.evidence() {
            for hypothesis in matrix.hypotheses() {
                if let Some(rating) = matrix.rating(evidence.id(), hypothesis.id()) {
                    ratings.push(RatingCell {
                        evidence_id: *evidence.id(),
                        hypothesis_id: *hypothesis.id(),
                        consistency: rating.consistency(),
                        reasoning: rating.reasoning().map(str::to_string),
                        confidence: rating.confidence(),
                    });
                }
            }
        }

        Self {
            matrix_id: *matrix.id(),
            title: matrix.title().to_string(),
            description: matrix.description().to_string(),
            status: matrix.status(),
            notes: matrix.notes().map(str::to_string),
            created_at: *matrix.created_at(),
            updated_at: *matrix.updated_at(),
            hypotheses: matrix.hypotheses().to_vec(),
            evidence: matrix.evidence().to_vec(),
            ratings,
        }
    }

    /// Returns the number of hypotheses.
    pub fn hypothesis_count(&self) -> usize {
        self.hypotheses.len()
    }

    /// Returns the number of evidence items.
    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }

    /// Looks up a hypothesis by id.
    pub fn hypothesis(&self, id: &HypothesisId) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.id() == id)
    }

    /// Looks up an evidence item by id.
    pub fn evidence_item(&self, id: &EvidenceId) -> Option<&Evidence> {
        self.evidence.iter().find(|e| e.id() == id)
    }

    /// Looks up the rating cell for an (evidence, hypothesis) pair.
    pub fn rating(
        &self,
        evidence_id: &EvidenceId,
        hypothesis_id: &HypothesisId,
    ) -> Option<&RatingCell> {
        self.ratings
            .iter()
            .find(|c| &c.evidence_id == evidence_id && &c.hypothesis_id == hypothesis_id)
    }

    /// Builds a pair-keyed lookup table over the rating cells.
    pub fn rating_lookup(&self) -> HashMap<(EvidenceId, HypothesisId), &RatingCell> {
        self.ratings
            .iter()
            .map(|c| ((c.evidence_id, c.hypothesis_id), c))
            .collect()
    }

    /// Returns the rating cells against one hypothesis, in row order.
    pub fn ratings_for_hypothesis(&self, hypothesis_id: &HypothesisId) -> Vec<&RatingCell> {
        self.ratings
            .iter()
            .filter(|c| &c.hypothesis_id == hypothesis_id)
            .collect()
    }

    /// Returns the rating cells for one evidence row, in column order.
    pub fn ratings_for_evidence(&self, evidence_id: &EvidenceId) -> Vec<&RatingCell> {
        self.ratings
            .iter()
            .filter(|c| &c.evidence_id == evidence_id)
            .collect()
    }

    /// Derives a snapshot that keeps only the evidence matching the
    /// predicate, with rows renumbered and orphaned cells dropped.
    pub fn retain_evidence<F>(&self, mut keep: F) -> MatrixSnapshot
    where
        F: FnMut(&Evidence) -> bool,
    {
        let mut filtered = self.clone();
        filtered.evidence.retain(|e| keep(e));
        for (index, evidence) in filtered.evidence.iter_mut().enumerate() {
            evidence.set_row_index(index);
        }
        let kept: std::collections::HashSet<EvidenceId> =
            filtered.evidence.iter().map(|e| *e.id()).collect();
        filtered.ratings.retain(|c| kept.contains(&c.evidence_id));
        filtered
    }
}

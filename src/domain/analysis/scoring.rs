//! Scoring Engine - inconsistency counting and ranked hypothesis scores.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::foundation::{DomainError, ErrorCode, HypothesisId};
use crate::domain::matrix::MatrixSnapshot;

/// Per-hypothesis output of one scoring run.
///
/// Transient: recomputed on demand and never stored by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisScore {
    pub hypothesis_id: HypothesisId,
    /// Number of ratings with negative weight. The primary ACH metric:
    /// fewer inconsistencies means better supported.
    pub inconsistency_count: usize,
    /// Sum of weight x credibility x relevance x confidence over rated,
    /// applicable pairs.
    pub weighted_score: f64,
    /// Weighted score rescaled into [0, 1] across the matrix.
    pub normalized_score: f64,
    /// Position in the ranking, 0 = lead.
    pub rank: usize,
    /// True for the rank-0 hypothesis.
    pub is_lead: bool,
}

/// Converts a matrix snapshot into ranked hypothesis scores.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores and ranks every hypothesis in the snapshot.
    ///
    /// # Algorithm
    ///
    /// For each hypothesis, every rated evidence row contributes its
    /// weight (`--` -2 .. `++` +2); `N/A` and unrated pairs are excluded.
    /// The inconsistency count (negative-weight ratings) is the primary
    /// sort key, ascending. The weighted score (weight x credibility x
    /// relevance x confidence) is min-max normalized across hypotheses and
    /// breaks ties descending; the column index breaks remaining ties.
    ///
    /// # Edge Cases
    ///
    /// - No evidence: every hypothesis scores zero and ranks by column
    /// - All weighted scores equal: all normalize to 0.5
    ///
    /// # Errors
    ///
    /// - `EmptyMatrix` if the snapshot has no hypotheses
    pub fn score(snapshot: &MatrixSnapshot) -> Result<Vec<HypothesisScore>, DomainError> {
        if snapshot.hypotheses.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyMatrix,
                "Cannot score a matrix with no hypotheses",
            ));
        }

        let lookup = snapshot.rating_lookup();

        struct Tally {
            hypothesis_id: HypothesisId,
            column_index: usize,
            inconsistency_count: usize,
            weighted_score: f64,
        }

        let mut tallies: Vec<Tally> = snapshot
            .hypotheses
            .iter()
            .map(|hypothesis| {
                let mut inconsistency_count = 0;
                let mut weighted_score = 0.0;

                for evidence in &snapshot.evidence {
                    let Some(cell) = lookup.get(&(*evidence.id(), *hypothesis.id())) else {
                        continue;
                    };
                    let Some(weight) = cell.weight() else {
                        continue;
                    };
                    if weight < 0 {
                        inconsistency_count += 1;
                    }
                    weighted_score += f64::from(weight)
                        * evidence.credibility().value()
                        * evidence.relevance().value()
                        * cell.confidence.value();
                }

                Tally {
                    hypothesis_id: *hypothesis.id(),
                    column_index: hypothesis.column_index(),
                    inconsistency_count,
                    weighted_score,
                }
            })
            .collect();

        let min = tallies
            .iter()
            .map(|t| t.weighted_score)
            .fold(f64::INFINITY, f64::min);
        let max = tallies
            .iter()
            .map(|t| t.weighted_score)
            .fold(f64::NEG_INFINITY, f64::max);
        let spread = max - min;

        tallies.sort_by(|a, b| {
            a.inconsistency_count
                .cmp(&b.inconsistency_count)
                .then(
                    b.weighted_score
                        .partial_cmp(&a.weighted_score)
                        .unwrap_or(Ordering::Equal),
                )
                .then(a.column_index.cmp(&b.column_index))
        });

        Ok(tallies
            .into_iter()
            .enumerate()
            .map(|(rank, tally)| {
                let normalized_score = if spread > f64::EPSILON {
                    (tally.weighted_score - min) / spread
                } else {
                    0.5
                };
                HypothesisScore {
                    hypothesis_id: tally.hypothesis_id,
                    inconsistency_count: tally.inconsistency_count,
                    weighted_score: tally.weighted_score,
                    normalized_score,
                    rank,
                    is_lead: rank == 0,
                }
            })
            .collect())
    }

    /// Returns the lead hypothesis id for a score set.
    pub fn lead(scores: &[HypothesisScore]) -> Option<HypothesisId> {
        scores.iter().find(|s| s.is_lead).map(|s| s.hypothesis_id)
    }
}

//! Rating entity - one analyst judgment linking evidence to a hypothesis.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Consistency, UnitScore};

/// The judgment of how one evidence item bears on one hypothesis.
///
/// Absence of a rating is semantically distinct from `Neutral`: an unrated
/// pair simply does not exist in the matrix's rating map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    consistency: Consistency,
    reasoning: Option<String>,
    confidence: UnitScore,
}

impl Rating {
    /// Creates a new rating.
    pub fn new(
        consistency: Consistency,
        reasoning: Option<String>,
        confidence: UnitScore,
    ) -> Self {
        Self {
            consistency,
            reasoning,
            confidence,
        }
    }

    /// Returns the consistency value.
    pub fn consistency(&self) -> Consistency {
        self.consistency
    }

    /// Returns the analyst's reasoning.
    pub fn reasoning(&self) -> Option<&str> {
        self.reasoning.as_deref()
    }

    /// Returns the analyst confidence.
    pub fn confidence(&self) -> UnitScore {
        self.confidence
    }

    /// Returns the numeric weight, None for `N/A`.
    pub fn weight(&self) -> Option<i8> {
        self.consistency.weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_exposes_weight() {
        let rating = Rating::new(
            Consistency::StronglyInconsistent,
            Some("contradicts the timeline".to_string()),
            UnitScore::try_new("confidence", 0.7).unwrap(),
        );
        assert_eq!(rating.weight(), Some(-2));
        assert_eq!(rating.reasoning(), Some("contradicts the timeline"));
    }

    #[test]
    fn not_applicable_rating_has_no_weight() {
        let rating = Rating::new(Consistency::NotApplicable, None, UnitScore::ONE);
        assert_eq!(rating.weight(), None);
    }
}

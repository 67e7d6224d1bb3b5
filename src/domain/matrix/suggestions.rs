//! Validated suggestion inputs from the LLM collaborator.
//!
//! The collaborator boundary turns free-text model output into these
//! structs before they reach the core; the Matrix Store then treats them
//! as ordinary add/set inputs and never parses text itself.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Consistency, DomainError, EvidenceType, HypothesisId};

/// A suggested hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisSuggestion {
    pub title: String,
    pub description: String,
}

impl HypothesisSuggestion {
    /// Creates a suggestion, rejecting an empty title.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation(
                "title",
                "Suggested hypothesis title cannot be empty",
            ));
        }
        Ok(Self {
            title,
            description: description.into(),
        })
    }
}

/// A suggested evidence item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSuggestion {
    pub description: String,
    pub evidence_type: EvidenceType,
    pub source: Option<String>,
}

impl EvidenceSuggestion {
    /// Creates a suggestion, rejecting an empty description.
    pub fn new(
        description: impl Into<String>,
        evidence_type: EvidenceType,
        source: Option<String>,
    ) -> Result<Self, DomainError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "description",
                "Suggested evidence description cannot be empty",
            ));
        }
        Ok(Self {
            description,
            evidence_type,
            source,
        })
    }
}

/// A suggested rating for one (evidence, hypothesis) pair.
///
/// The consistency value is parsed from its scale symbol at construction,
/// so an invalid symbol is rejected before it reaches the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSuggestion {
    pub hypothesis_id: HypothesisId,
    pub consistency: Consistency,
    pub explanation: Option<String>,
}

impl RatingSuggestion {
    /// Creates a suggestion from a raw scale symbol.
    ///
    /// # Errors
    ///
    /// - `InvalidRating` if the symbol is not on the scale
    pub fn from_symbol(
        hypothesis_id: HypothesisId,
        symbol: &str,
        explanation: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            hypothesis_id,
            consistency: symbol.parse()?,
            explanation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn hypothesis_suggestion_rejects_empty_title() {
        assert!(HypothesisSuggestion::new("", "desc").is_err());
        assert!(HypothesisSuggestion::new("State actor", "desc").is_ok());
    }

    #[test]
    fn evidence_suggestion_rejects_empty_description() {
        assert!(EvidenceSuggestion::new("", EvidenceType::Fact, None).is_err());
    }

    #[test]
    fn rating_suggestion_parses_symbol() {
        let s =
            RatingSuggestion::from_symbol(HypothesisId::new(), "++", Some("aligned".into())).unwrap();
        assert_eq!(s.consistency, Consistency::StronglyConsistent);
    }

    #[test]
    fn rating_suggestion_rejects_bad_symbol() {
        let err = RatingSuggestion::from_symbol(HypothesisId::new(), "maybe", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRating);
    }
}

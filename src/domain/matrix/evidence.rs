//! Evidence entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EvidenceId, EvidenceType, UnitScore};

/// An atom of observation, one row of the matrix.
///
/// # Invariants
///
/// - `description` is non-empty
/// - `credibility` and `relevance` are in [0, 1]
/// - `row_index` is kept contiguous by the owning `Matrix`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    id: EvidenceId,
    description: String,
    /// Free-text source citation.
    source: Option<String>,
    evidence_type: EvidenceType,
    credibility: UnitScore,
    relevance: UnitScore,
    row_index: usize,
    /// References to externally-tracked source documents.
    document_refs: Vec<String>,
}

impl Evidence {
    /// Creates a new evidence item at the given row.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the description is empty
    pub fn new(
        description: impl Into<String>,
        source: Option<String>,
        evidence_type: EvidenceType,
        credibility: UnitScore,
        relevance: UnitScore,
        row_index: usize,
    ) -> Result<Self, DomainError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(DomainError::validation(
                "description",
                "Evidence description cannot be empty",
            ));
        }
        Ok(Self {
            id: EvidenceId::new(),
            description,
            source,
            evidence_type,
            credibility,
            relevance,
            row_index,
            document_refs: Vec::new(),
        })
    }

    /// Returns the evidence id.
    pub fn id(&self) -> &EvidenceId {
        &self.id
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the source citation.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the evidence type tag.
    pub fn evidence_type(&self) -> &EvidenceType {
        &self.evidence_type
    }

    /// Returns the credibility score.
    pub fn credibility(&self) -> UnitScore {
        self.credibility
    }

    /// Returns the relevance score.
    pub fn relevance(&self) -> UnitScore {
        self.relevance
    }

    /// Returns the row index.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    /// Returns the linked document references.
    pub fn document_refs(&self) -> &[String] {
        &self.document_refs
    }

    pub(crate) fn set_row_index(&mut self, index: usize) {
        self.row_index = index;
    }

    pub(crate) fn add_document_ref(&mut self, reference: String) {
        self.document_refs.push(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence() -> Evidence {
        Evidence::new(
            "Intercepted cable mentions the meeting",
            Some("cable 2471".to_string()),
            EvidenceType::Document,
            UnitScore::try_new("credibility", 0.8).unwrap(),
            UnitScore::try_new("relevance", 0.9).unwrap(),
            0,
        )
        .unwrap()
    }

    #[test]
    fn new_evidence_carries_attributes() {
        let e = evidence();
        assert_eq!(e.description(), "Intercepted cable mentions the meeting");
        assert_eq!(e.source(), Some("cable 2471"));
        assert_eq!(e.evidence_type(), &EvidenceType::Document);
        assert_eq!(e.credibility().value(), 0.8);
        assert_eq!(e.relevance().value(), 0.9);
        assert_eq!(e.row_index(), 0);
        assert!(e.document_refs().is_empty());
    }

    #[test]
    fn rejects_empty_description() {
        let result = Evidence::new(
            "  ",
            None,
            EvidenceType::Fact,
            UnitScore::ONE,
            UnitScore::ONE,
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn document_refs_accumulate() {
        let mut e = evidence();
        e.add_document_ref("doc-1".to_string());
        e.add_document_ref("doc-2".to_string());
        assert_eq!(e.document_refs(), &["doc-1", "doc-2"]);
    }
}

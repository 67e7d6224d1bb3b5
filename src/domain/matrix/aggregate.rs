//! Matrix aggregate entity.
//!
//! The matrix is the single source of truth for its hypotheses, evidence,
//! and ratings. Hypotheses and evidence live in insertion-ordered
//! collections keyed by stable ids; the column/row indices are derived and
//! renumbered on every structural removal so they always form a contiguous
//! zero-based sequence.

use std::collections::HashMap;

use crate::domain::foundation::{
    Consistency, DomainError, ErrorCode, EvidenceId, EvidenceType, HypothesisId, MatrixId,
    MatrixStatus, Timestamp, UnitScore,
};

use super::{Evidence, Hypothesis, MatrixSnapshot, Rating};

/// ACH matrix aggregate - an analytic workspace.
///
/// # Invariants
///
/// - hypothesis column indices and evidence row indices are contiguous,
///   zero-based, and duplicate-free
/// - every rating references an existing (evidence, hypothesis) pair;
///   removals cascade
/// - at most one rating exists per (evidence, hypothesis) pair
/// - archived matrices reject mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    id: MatrixId,
    title: String,
    description: String,
    status: MatrixStatus,
    notes: Option<String>,
    hypotheses: Vec<Hypothesis>,
    evidence: Vec<Evidence>,
    ratings: HashMap<(EvidenceId, HypothesisId), Rating>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Matrix {
    /// Creates a new draft matrix with empty collections.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Matrix title cannot be empty"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: MatrixId::new(),
            title,
            description: description.into(),
            status: MatrixStatus::Draft,
            notes: None,
            hypotheses: Vec::new(),
            evidence: Vec::new(),
            ratings: HashMap::new(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the matrix id.
    pub fn id(&self) -> &MatrixId {
        &self.id
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> MatrixStatus {
        self.status
    }

    /// Returns the analyst notes.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the hypotheses in column order.
    pub fn hypotheses(&self) -> &[Hypothesis] {
        &self.hypotheses
    }

    /// Returns the evidence in row order.
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    /// Returns the number of hypotheses.
    pub fn hypothesis_count(&self) -> usize {
        self.hypotheses.len()
    }

    /// Returns the number of evidence items.
    pub fn evidence_count(&self) -> usize {
        self.evidence.len()
    }

    /// Returns the number of ratings.
    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }

    /// Looks up a hypothesis by id.
    pub fn hypothesis(&self, id: &HypothesisId) -> Option<&Hypothesis> {
        self.hypotheses.iter().find(|h| h.id() == id)
    }

    /// Looks up an evidence item by id.
    pub fn evidence_item(&self, id: &EvidenceId) -> Option<&Evidence> {
        self.evidence.iter().find(|e| e.id() == id)
    }

    /// Looks up a rating by (evidence, hypothesis) pair.
    pub fn rating(&self, evidence_id: &EvidenceId, hypothesis_id: &HypothesisId) -> Option<&Rating> {
        self.ratings.get(&(*evidence_id, *hypothesis_id))
    }

    /// Returns when the matrix was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the matrix was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Updates title and description.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty
    /// - `MatrixArchived` if the matrix is archived
    pub fn update_details(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Matrix title cannot be empty"));
        }
        self.title = title;
        self.description = description.into();
        self.touch();
        Ok(())
    }

    /// Replaces the analyst notes.
    ///
    /// # Errors
    ///
    /// - `MatrixArchived` if the matrix is archived
    pub fn set_notes(&mut self, notes: Option<String>) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.notes = notes;
        self.touch();
        Ok(())
    }

    /// Moves the matrix to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the lifecycle does not permit it
    pub fn transition_status(&mut self, target: MatrixStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition matrix from {} to {}", self.status, target),
            ));
        }
        self.status = target;
        self.touch();
        Ok(())
    }

    /// Appends a hypothesis at the next column index.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the title is empty
    /// - `MatrixArchived` if the matrix is archived
    pub fn add_hypothesis(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<&Hypothesis, DomainError> {
        self.ensure_mutable()?;
        let hypothesis = Hypothesis::new(title, description, self.hypotheses.len())?;
        self.hypotheses.push(hypothesis);
        self.touch();
        Ok(self.hypotheses.last().expect("just pushed"))
    }

    /// Removes a hypothesis, cascading its ratings and renumbering columns.
    ///
    /// # Errors
    ///
    /// - `HypothesisNotFound` if the id is absent
    /// - `MatrixArchived` if the matrix is archived
    pub fn remove_hypothesis(&mut self, id: &HypothesisId) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        let position = self
            .hypotheses
            .iter()
            .position(|h| h.id() == id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::HypothesisNotFound,
                    format!("Hypothesis not found: {}", id),
                )
            })?;

        self.hypotheses.remove(position);
        self.ratings.retain(|(_, h), _| h != id);
        self.renumber_hypotheses();
        self.touch();
        Ok(())
    }

    /// Appends an evidence item at the next row index.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the description is empty
    /// - `MatrixArchived` if the matrix is archived
    pub fn add_evidence(
        &mut self,
        description: impl Into<String>,
        source: Option<String>,
        evidence_type: EvidenceType,
        credibility: UnitScore,
        relevance: UnitScore,
    ) -> Result<&Evidence, DomainError> {
        self.ensure_mutable()?;
        let evidence = Evidence::new(
            description,
            source,
            evidence_type,
            credibility,
            relevance,
            self.evidence.len(),
        )?;
        self.evidence.push(evidence);
        self.touch();
        Ok(self.evidence.last().expect("just pushed"))
    }

    /// Removes an evidence item, cascading its ratings and renumbering rows.
    ///
    /// # Errors
    ///
    /// - `EvidenceNotFound` if the id is absent
    /// - `MatrixArchived` if the matrix is archived
    pub fn remove_evidence(&mut self, id: &EvidenceId) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        let position = self
            .evidence
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::EvidenceNotFound,
                    format!("Evidence not found: {}", id),
                )
            })?;

        self.evidence.remove(position);
        self.ratings.retain(|(e, _), _| e != id);
        self.renumber_evidence();
        self.touch();
        Ok(())
    }

    /// Links an externally-tracked document to an evidence item.
    ///
    /// # Errors
    ///
    /// - `EvidenceNotFound` if the id is absent
    /// - `MatrixArchived` if the matrix is archived
    pub fn link_document(
        &mut self,
        evidence_id: &EvidenceId,
        reference: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        let evidence = self
            .evidence
            .iter_mut()
            .find(|e| e.id() == evidence_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::EvidenceNotFound,
                    format!("Evidence not found: {}", evidence_id),
                )
            })?;
        evidence.add_document_ref(reference.into());
        self.touch();
        Ok(())
    }

    /// Upserts the rating for an (evidence, hypothesis) pair.
    ///
    /// Both ids are checked before anything is written, so a failed call
    /// leaves the matrix unchanged.
    ///
    /// # Errors
    ///
    /// - `EvidenceNotFound` / `HypothesisNotFound` if either id is absent
    /// - `MatrixArchived` if the matrix is archived
    pub fn set_rating(
        &mut self,
        evidence_id: &EvidenceId,
        hypothesis_id: &HypothesisId,
        consistency: Consistency,
        reasoning: Option<String>,
        confidence: UnitScore,
    ) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        if self.evidence_item(evidence_id).is_none() {
            return Err(DomainError::new(
                ErrorCode::EvidenceNotFound,
                format!("Evidence not found: {}", evidence_id),
            ));
        }
        if self.hypothesis(hypothesis_id).is_none() {
            return Err(DomainError::new(
                ErrorCode::HypothesisNotFound,
                format!("Hypothesis not found: {}", hypothesis_id),
            ));
        }

        self.ratings.insert(
            (*evidence_id, *hypothesis_id),
            Rating::new(consistency, reasoning, confidence),
        );
        self.touch();
        Ok(())
    }

    /// Marks one hypothesis as the lead, clearing the flag everywhere else.
    ///
    /// Called only by the score-calculation path; `None` clears all flags.
    pub fn set_lead(&mut self, lead: Option<&HypothesisId>) {
        for hypothesis in &mut self.hypotheses {
            let is_lead = lead.is_some_and(|id| hypothesis.id() == id);
            hypothesis.set_lead(is_lead);
        }
    }

    /// Produces the immutable, fully-populated view consumed by analyzers.
    pub fn snapshot(&self) -> MatrixSnapshot {
        MatrixSnapshot::from_matrix(self)
    }

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if !self.status.allows_mutation() {
            return Err(DomainError::new(
                ErrorCode::MatrixArchived,
                "Archived matrices cannot be modified",
            ));
        }
        Ok(())
    }

    fn renumber_hypotheses(&mut self) {
        for (index, hypothesis) in self.hypotheses.iter_mut().enumerate() {
            hypothesis.set_column_index(index);
        }
    }

    fn renumber_evidence(&mut self) {
        for (index, evidence) in self.evidence.iter_mut().enumerate() {
            evidence.set_row_index(index);
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

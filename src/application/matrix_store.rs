//! MatrixStore - the single mutation surface over matrix aggregates.
//!
//! Every mutating operation is serialized per matrix: it acquires that
//! matrix's lock, loads the aggregate from the repository, applies the
//! change, saves the whole aggregate back, and then publishes a domain
//! event. Snapshot reads skip the lock; the repository swaps whole
//! aggregates, so readers never observe a partially-applied mutation.
//! Operations on different matrices proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::analysis::{HypothesisScore, ScoringEngine};
use crate::domain::foundation::{
    Consistency, DomainError, ErrorCode, EventEnvelope, EventId, EvidenceId, EvidenceType,
    HypothesisId, MatrixId, MatrixStatus, SerializableDomainEvent, Timestamp, UnitScore,
};
use crate::domain::matrix::{
    Evidence, EvidenceAdded, EvidenceRemoved, EvidenceSuggestion, Hypothesis, HypothesisAdded,
    HypothesisRemoved, HypothesisSuggestion, Matrix, MatrixCreated, MatrixDeleted, MatrixSnapshot,
    MatrixUpdated, RatingSet, RatingSuggestion, ScoresCalculated,
};
use crate::ports::{EventPublisher, MatrixRepository};

/// Command service owning all matrix mutations.
pub struct MatrixStore {
    repository: Arc<dyn MatrixRepository>,
    events: Arc<dyn EventPublisher>,
    locks: Mutex<HashMap<MatrixId, Arc<Mutex<()>>>>,
}

impl MatrixStore {
    pub fn new(repository: Arc<dyn MatrixRepository>, events: Arc<dyn EventPublisher>) -> Self {
        Self {
            repository,
            events,
            locks: Mutex::new(HashMap::new()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Matrix lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// Creates a new draft matrix.
    pub async fn create_matrix(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Matrix, DomainError> {
        let matrix = Matrix::new(title, description)?;
        self.repository.save(&matrix).await?;
        debug!(matrix_id = %matrix.id(), "matrix created");

        self.publish(
            MatrixCreated {
                event_id: EventId::new(),
                matrix_id: *matrix.id(),
                title: matrix.title().to_string(),
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;

        Ok(matrix)
    }

    /// Updates a matrix's title and description.
    pub async fn update_details(
        &self,
        matrix_id: &MatrixId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        matrix.update_details(title, description)?;
        self.repository.save(&matrix).await?;

        self.publish_matrix_updated(matrix_id).await;
        Ok(())
    }

    /// Replaces a matrix's analyst notes.
    pub async fn set_notes(
        &self,
        matrix_id: &MatrixId,
        notes: Option<String>,
    ) -> Result<(), DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        matrix.set_notes(notes)?;
        self.repository.save(&matrix).await?;

        self.publish_matrix_updated(matrix_id).await;
        Ok(())
    }

    /// Moves a matrix to a new lifecycle status.
    pub async fn set_status(
        &self,
        matrix_id: &MatrixId,
        status: MatrixStatus,
    ) -> Result<(), DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        matrix.transition_status(status)?;
        self.repository.save(&matrix).await?;
        debug!(matrix_id = %matrix_id, %status, "matrix status changed");

        self.publish_matrix_updated(matrix_id).await;
        Ok(())
    }

    /// Deletes a matrix.
    pub async fn delete_matrix(&self, matrix_id: &MatrixId) -> Result<(), DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        self.repository.delete(matrix_id).await?;
        debug!(matrix_id = %matrix_id, "matrix deleted");

        self.publish(
            MatrixDeleted {
                event_id: EventId::new(),
                matrix_id: *matrix_id,
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Hypotheses
    // ─────────────────────────────────────────────────────────────────────

    /// Appends a hypothesis at the next column index.
    pub async fn add_hypothesis(
        &self,
        matrix_id: &MatrixId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Hypothesis, DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        let hypothesis = matrix.add_hypothesis(title, description)?.clone();
        self.repository.save(&matrix).await?;
        debug!(matrix_id = %matrix_id, hypothesis_id = %hypothesis.id(), "hypothesis added");

        self.publish(
            HypothesisAdded {
                event_id: EventId::new(),
                matrix_id: *matrix_id,
                hypothesis_id: *hypothesis.id(),
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;

        Ok(hypothesis)
    }

    /// Accepts a validated hypothesis suggestion from the LLM collaborator.
    pub async fn add_suggested_hypothesis(
        &self,
        matrix_id: &MatrixId,
        suggestion: HypothesisSuggestion,
    ) -> Result<Hypothesis, DomainError> {
        self.add_hypothesis(matrix_id, suggestion.title, suggestion.description)
            .await
    }

    /// Removes a hypothesis, its ratings, and renumbers the columns.
    pub async fn remove_hypothesis(
        &self,
        matrix_id: &MatrixId,
        hypothesis_id: &HypothesisId,
    ) -> Result<(), DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        matrix.remove_hypothesis(hypothesis_id)?;
        self.repository.save(&matrix).await?;
        debug!(matrix_id = %matrix_id, hypothesis_id = %hypothesis_id, "hypothesis removed");

        self.publish(
            HypothesisRemoved {
                event_id: EventId::new(),
                matrix_id: *matrix_id,
                hypothesis_id: *hypothesis_id,
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Evidence
    // ─────────────────────────────────────────────────────────────────────

    /// Appends an evidence item at the next row index.
    pub async fn add_evidence(
        &self,
        matrix_id: &MatrixId,
        description: impl Into<String>,
        source: Option<String>,
        evidence_type: EvidenceType,
        credibility: UnitScore,
        relevance: UnitScore,
    ) -> Result<Evidence, DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        let evidence = matrix
            .add_evidence(description, source, evidence_type, credibility, relevance)?
            .clone();
        self.repository.save(&matrix).await?;
        debug!(matrix_id = %matrix_id, evidence_id = %evidence.id(), "evidence added");

        self.publish(
            EvidenceAdded {
                event_id: EventId::new(),
                matrix_id: *matrix_id,
                evidence_id: *evidence.id(),
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;

        Ok(evidence)
    }

    /// Accepts a validated evidence suggestion from the LLM collaborator.
    ///
    /// Credibility and relevance stay an analyst judgment; the collaborator
    /// boundary supplies them alongside the suggestion.
    pub async fn add_suggested_evidence(
        &self,
        matrix_id: &MatrixId,
        suggestion: EvidenceSuggestion,
        credibility: UnitScore,
        relevance: UnitScore,
    ) -> Result<Evidence, DomainError> {
        self.add_evidence(
            matrix_id,
            suggestion.description,
            suggestion.source,
            suggestion.evidence_type,
            credibility,
            relevance,
        )
        .await
    }

    /// Removes an evidence item, its ratings, and renumbers the rows.
    pub async fn remove_evidence(
        &self,
        matrix_id: &MatrixId,
        evidence_id: &EvidenceId,
    ) -> Result<(), DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        matrix.remove_evidence(evidence_id)?;
        self.repository.save(&matrix).await?;
        debug!(matrix_id = %matrix_id, evidence_id = %evidence_id, "evidence removed");

        self.publish(
            EvidenceRemoved {
                event_id: EventId::new(),
                matrix_id: *matrix_id,
                evidence_id: *evidence_id,
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;
        Ok(())
    }

    /// Links an externally-tracked document to an evidence item.
    pub async fn link_document(
        &self,
        matrix_id: &MatrixId,
        evidence_id: &EvidenceId,
        reference: impl Into<String>,
    ) -> Result<(), DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        matrix.link_document(evidence_id, reference)?;
        self.repository.save(&matrix).await?;

        self.publish_matrix_updated(matrix_id).await;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Ratings & scoring
    // ─────────────────────────────────────────────────────────────────────

    /// Upserts the rating for an (evidence, hypothesis) pair.
    pub async fn set_rating(
        &self,
        matrix_id: &MatrixId,
        evidence_id: &EvidenceId,
        hypothesis_id: &HypothesisId,
        consistency: Consistency,
        reasoning: Option<String>,
        confidence: UnitScore,
    ) -> Result<(), DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        matrix.set_rating(evidence_id, hypothesis_id, consistency, reasoning, confidence)?;
        self.repository.save(&matrix).await?;
        debug!(
            matrix_id = %matrix_id,
            evidence_id = %evidence_id,
            hypothesis_id = %hypothesis_id,
            "rating set"
        );

        self.publish(
            RatingSet {
                event_id: EventId::new(),
                matrix_id: *matrix_id,
                evidence_id: *evidence_id,
                hypothesis_id: *hypothesis_id,
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;
        Ok(())
    }

    /// Accepts a validated rating suggestion from the LLM collaborator.
    pub async fn apply_rating_suggestion(
        &self,
        matrix_id: &MatrixId,
        evidence_id: &EvidenceId,
        suggestion: RatingSuggestion,
        confidence: UnitScore,
    ) -> Result<(), DomainError> {
        self.set_rating(
            matrix_id,
            evidence_id,
            &suggestion.hypothesis_id,
            suggestion.consistency,
            suggestion.explanation,
            confidence,
        )
        .await
    }

    /// Runs the scoring engine and persists the lead flag.
    ///
    /// Scoring itself is pure; this operation is the only writer of the
    /// `is_lead` flag.
    pub async fn calculate_scores(
        &self,
        matrix_id: &MatrixId,
    ) -> Result<Vec<HypothesisScore>, DomainError> {
        let lock = self.mutation_lock(matrix_id).await;
        let _guard = lock.lock().await;

        let mut matrix = self.load(matrix_id).await?;
        let scores = ScoringEngine::score(&matrix.snapshot())?;
        let lead = ScoringEngine::lead(&scores).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Score set has no lead hypothesis")
        })?;
        matrix.set_lead(Some(&lead));
        self.repository.save(&matrix).await?;
        debug!(matrix_id = %matrix_id, lead_hypothesis_id = %lead, "scores calculated");

        self.publish(
            ScoresCalculated {
                event_id: EventId::new(),
                matrix_id: *matrix_id,
                lead_hypothesis_id: lead,
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;

        Ok(scores)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the immutable snapshot consumed by all analyzers.
    pub async fn get_matrix_data(&self, matrix_id: &MatrixId) -> Result<MatrixSnapshot, DomainError> {
        Ok(self.load(matrix_id).await?.snapshot())
    }

    /// Lists the ids of all stored matrices.
    pub async fn list_matrices(&self) -> Result<Vec<MatrixId>, DomainError> {
        self.repository.list_ids().await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    async fn mutation_lock(&self, matrix_id: &MatrixId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(*matrix_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn load(&self, matrix_id: &MatrixId) -> Result<Matrix, DomainError> {
        self.repository
            .find_by_id(matrix_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::MatrixNotFound,
                    format!("Matrix not found: {}", matrix_id),
                )
            })
    }

    /// Best-effort publication: the mutation already committed, so a
    /// transport failure is logged and swallowed.
    async fn publish(&self, envelope: EventEnvelope) {
        if let Err(error) = self.events.publish(envelope).await {
            warn!(%error, "event publication failed");
        }
    }

    async fn publish_matrix_updated(&self, matrix_id: &MatrixId) {
        self.publish(
            MatrixUpdated {
                event_id: EventId::new(),
                matrix_id: *matrix_id,
                occurred_at: Timestamp::now(),
            }
            .to_envelope(),
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEventBus, InMemoryMatrixRepository};
    use async_trait::async_trait;

    fn score(value: f64) -> UnitScore {
        UnitScore::try_new("score", value).unwrap()
    }

    fn store() -> (MatrixStore, Arc<InMemoryMatrixRepository>, Arc<InMemoryEventBus>) {
        let repo = Arc::new(InMemoryMatrixRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let store = MatrixStore::new(repo.clone(), bus.clone());
        (store, repo, bus)
    }

    #[tokio::test]
    async fn create_matrix_saves_and_publishes() {
        let (store, repo, bus) = store();

        let matrix = store.create_matrix("Leak inquiry", "who did it").await.unwrap();

        assert_eq!(repo.matrix_count(), 1);
        assert!(bus.has_event("matrix.created"));
        let events = bus.events_of_type("matrix.created");
        assert_eq!(events[0].aggregate_id, matrix.id().to_string());
    }

    #[tokio::test]
    async fn add_hypothesis_to_unknown_matrix_fails() {
        let (store, _, bus) = store();

        let err = store
            .add_hypothesis(&MatrixId::new(), "H1", "")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::MatrixNotFound);
        assert!(!bus.has_event("hypothesis.added"));
    }

    #[tokio::test]
    async fn set_rating_validates_ids_and_publishes() {
        let (store, _, bus) = store();
        let matrix = store.create_matrix("M", "").await.unwrap();
        let h = store.add_hypothesis(matrix.id(), "H1", "").await.unwrap();
        let e = store
            .add_evidence(matrix.id(), "E1", None, EvidenceType::Fact, score(0.9), score(0.9))
            .await
            .unwrap();

        store
            .set_rating(
                matrix.id(),
                e.id(),
                h.id(),
                Consistency::Consistent,
                Some("fits".to_string()),
                score(0.8),
            )
            .await
            .unwrap();

        assert!(bus.has_event("rating.set"));

        let err = store
            .set_rating(
                matrix.id(),
                &EvidenceId::new(),
                h.id(),
                Consistency::Neutral,
                None,
                score(1.0),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EvidenceNotFound);
    }

    #[tokio::test]
    async fn calculate_scores_sets_lead_flag() {
        let (store, _, bus) = store();
        let matrix = store.create_matrix("M", "").await.unwrap();
        let h1 = store.add_hypothesis(matrix.id(), "H1", "").await.unwrap();
        let h2 = store.add_hypothesis(matrix.id(), "H2", "").await.unwrap();
        let e = store
            .add_evidence(matrix.id(), "E1", None, EvidenceType::Fact, score(1.0), score(1.0))
            .await
            .unwrap();
        store
            .set_rating(matrix.id(), e.id(), h1.id(), Consistency::StronglyConsistent, None, score(1.0))
            .await
            .unwrap();
        store
            .set_rating(matrix.id(), e.id(), h2.id(), Consistency::StronglyInconsistent, None, score(1.0))
            .await
            .unwrap();

        let scores = store.calculate_scores(matrix.id()).await.unwrap();

        assert_eq!(scores[0].hypothesis_id, *h1.id());
        let snapshot = store.get_matrix_data(matrix.id()).await.unwrap();
        assert!(snapshot.hypothesis(h1.id()).unwrap().is_lead());
        assert!(!snapshot.hypothesis(h2.id()).unwrap().is_lead());
        assert!(bus.has_event("scores.calculated"));
    }

    #[tokio::test]
    async fn suggestions_flow_through_ordinary_operations() {
        let (store, _, _) = store();
        let matrix = store.create_matrix("M", "").await.unwrap();

        let h = store
            .add_suggested_hypothesis(
                matrix.id(),
                HypothesisSuggestion::new("State actor", "planned operation").unwrap(),
            )
            .await
            .unwrap();

        let e = store
            .add_suggested_evidence(
                matrix.id(),
                EvidenceSuggestion::new(
                    "Registry shows shell company",
                    EvidenceType::Document,
                    Some("registry".to_string()),
                )
                .unwrap(),
                score(0.7),
                score(0.8),
            )
            .await
            .unwrap();

        let suggestion = RatingSuggestion::from_symbol(*h.id(), "+", Some("aligned".into())).unwrap();
        store
            .apply_rating_suggestion(matrix.id(), e.id(), suggestion, score(0.6))
            .await
            .unwrap();

        let snapshot = store.get_matrix_data(matrix.id()).await.unwrap();
        assert_eq!(snapshot.rating(e.id(), h.id()).unwrap().consistency, Consistency::Consistent);
    }

    #[tokio::test]
    async fn delete_matrix_removes_and_publishes() {
        let (store, repo, bus) = store();
        let matrix = store.create_matrix("M", "").await.unwrap();

        store.delete_matrix(matrix.id()).await.unwrap();

        assert_eq!(repo.matrix_count(), 0);
        assert!(bus.has_event("matrix.deleted"));
    }

    #[tokio::test]
    async fn get_matrix_data_unknown_id_fails() {
        let (store, _, _) = store();
        let err = store.get_matrix_data(&MatrixId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MatrixNotFound);
    }

    #[tokio::test]
    async fn publish_failure_does_not_fail_the_operation() {
        struct FailingPublisher;

        #[async_trait]
        impl EventPublisher for FailingPublisher {
            async fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
                Err(DomainError::new(ErrorCode::InternalError, "transport down"))
            }
            async fn publish_all(&self, _events: Vec<EventEnvelope>) -> Result<(), DomainError> {
                Err(DomainError::new(ErrorCode::InternalError, "transport down"))
            }
        }

        let repo = Arc::new(InMemoryMatrixRepository::new());
        let store = MatrixStore::new(repo.clone(), Arc::new(FailingPublisher));

        let matrix = store.create_matrix("M", "").await.unwrap();
        assert_eq!(repo.matrix_count(), 1);
        store.add_hypothesis(matrix.id(), "H1", "").await.unwrap();
    }

    #[tokio::test]
    async fn failed_mutation_leaves_state_unchanged() {
        let (store, _, bus) = store();
        let matrix = store.create_matrix("M", "").await.unwrap();
        store.add_hypothesis(matrix.id(), "H1", "").await.unwrap();
        bus.clear();

        let err = store
            .remove_hypothesis(matrix.id(), &HypothesisId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::HypothesisNotFound);

        let snapshot = store.get_matrix_data(matrix.id()).await.unwrap();
        assert_eq!(snapshot.hypothesis_count(), 1);
        assert_eq!(bus.event_count(), 0);
    }
}

//! Domain events emitted after matrix mutations.
//!
//! Each event carries the matrix id and the affected entity id; the caller
//! publishes them through the `EventPublisher` port after a successful
//! save. The core never depends on their delivery.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, EventId, EvidenceId, HypothesisId, MatrixId, Timestamp,
};

/// Published when a matrix is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixCreated {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub title: String,
    pub occurred_at: Timestamp,
}

domain_event!(
    MatrixCreated,
    event_type = "matrix.created",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Published when a matrix's details, notes, or status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixUpdated {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub occurred_at: Timestamp,
}

domain_event!(
    MatrixUpdated,
    event_type = "matrix.updated",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Published when a matrix is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixDeleted {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub occurred_at: Timestamp,
}

domain_event!(
    MatrixDeleted,
    event_type = "matrix.deleted",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Published when a hypothesis is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisAdded {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub hypothesis_id: HypothesisId,
    pub occurred_at: Timestamp,
}

domain_event!(
    HypothesisAdded,
    event_type = "hypothesis.added",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Published when a hypothesis is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HypothesisRemoved {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub hypothesis_id: HypothesisId,
    pub occurred_at: Timestamp,
}

domain_event!(
    HypothesisRemoved,
    event_type = "hypothesis.removed",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Published when an evidence item is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceAdded {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub evidence_id: EvidenceId,
    pub occurred_at: Timestamp,
}

domain_event!(
    EvidenceAdded,
    event_type = "evidence.added",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Published when an evidence item is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRemoved {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub evidence_id: EvidenceId,
    pub occurred_at: Timestamp,
}

domain_event!(
    EvidenceRemoved,
    event_type = "evidence.removed",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Published when a rating is set or replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSet {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub evidence_id: EvidenceId,
    pub hypothesis_id: HypothesisId,
    pub occurred_at: Timestamp,
}

domain_event!(
    RatingSet,
    event_type = "rating.set",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

/// Published after a scoring run has been applied to the matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoresCalculated {
    pub event_id: EventId,
    pub matrix_id: MatrixId,
    pub lead_hypothesis_id: HypothesisId,
    pub occurred_at: Timestamp,
}

domain_event!(
    ScoresCalculated,
    event_type = "scores.calculated",
    aggregate_id = matrix_id,
    aggregate_type = "Matrix",
    occurred_at = occurred_at,
    event_id = event_id
);

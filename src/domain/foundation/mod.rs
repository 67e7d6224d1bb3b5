//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the ACH Workbench domain.

mod consistency;
mod errors;
mod events;
mod evidence_type;
mod ids;
mod matrix_status;
mod timestamp;
mod unit_score;

pub use consistency::Consistency;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use evidence_type::EvidenceType;
pub use ids::{EvidenceId, HypothesisId, MatrixId};
pub use matrix_status::MatrixStatus;
pub use timestamp::Timestamp;
pub use unit_score::UnitScore;

pub use crate::domain_event;

//! Event infrastructure for domain event publishing and handling.
//!
//! Provides the core types for event-driven integration with collaborators:
//! - `EventId` - Unique identifier for events (deduplication)
//! - `EventMetadata` - Correlation context
//! - `EventEnvelope` - Transport wrapper for domain events
//! - `DomainEvent` - Trait that all domain events implement
//! - `domain_event!` - Macro to simplify DomainEvent implementations
//!
//! The core publishes envelopes after successful mutations and never
//! depends on their delivery or ordering.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Unique identifier for a single event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random EventId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation context attached to every envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Correlation id linking events to the request that caused them.
    pub correlation_id: Option<String>,
}

/// Transport wrapper around a serialized domain event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique id for deduplication.
    pub event_id: EventId,
    /// Event type string used for routing (e.g. "hypothesis.added").
    pub event_type: String,
    /// Id of the aggregate that emitted this event.
    pub aggregate_id: String,
    /// Kind of aggregate (always "Matrix" in this core).
    pub aggregate_type: String,
    /// When the event occurred.
    pub occurred_at: Timestamp,
    /// The serialized event.
    pub payload: JsonValue,
    /// Correlation context.
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Attaches a correlation id.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(correlation_id.into());
        self
    }
}

/// Trait that all domain events must implement.
///
/// Use the `domain_event!` macro to implement this trait with minimal
/// boilerplate. Types that also implement `Serialize` get `to_envelope()`
/// through the `SerializableDomainEvent` extension trait.
pub trait DomainEvent: Send + Sync {
    /// Returns the event type string (e.g. "matrix.created").
    fn event_type(&self) -> &'static str;

    /// Returns the id of the aggregate that emitted this event.
    fn aggregate_id(&self) -> String;

    /// Returns the kind of aggregate.
    fn aggregate_type(&self) -> &'static str;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Returns the unique id for this event instance.
    fn event_id(&self) -> EventId;
}

/// Extension trait that provides `to_envelope()` for serializable events.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Converts this domain event into an `EventEnvelope` for transport.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            event_id: self.event_id(),
            event_type: self.event_type().to_string(),
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)
                .expect("Event serialization should never fail for well-formed events"),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Macro to implement the DomainEvent trait with minimal boilerplate.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct MatrixCreated {
///     pub event_id: EventId,
///     pub matrix_id: MatrixId,
///     pub occurred_at: Timestamp,
/// }
///
/// domain_event!(
///     MatrixCreated,
///     event_type = "matrix.created",
///     aggregate_id = matrix_id,
///     aggregate_type = "Matrix",
///     occurred_at = occurred_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type:expr,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $agg_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field
            }
        }
    };
}

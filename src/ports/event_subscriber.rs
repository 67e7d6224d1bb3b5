//! EventSubscriber port - Interface for consuming domain events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler invoked for each delivered event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process one event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name, used in error reporting.
    fn name(&self) -> &'static str;
}

/// Port for registering event handlers.
pub trait EventSubscriber: Send + Sync {
    /// Register a handler for one event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Register a handler for several event types at once.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventSubscriber) {}
}

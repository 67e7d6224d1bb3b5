//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MatrixRepository` - persistence contract for matrix aggregates
//! - `EventPublisher` - publishing domain events to collaborators
//! - `EventSubscriber` / `EventHandler` - consuming domain events

mod event_publisher;
mod event_subscriber;
mod matrix_repository;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
pub use matrix_repository::MatrixRepository;

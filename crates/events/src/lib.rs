//! Portal activity events.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PortalEvent`]: the domain event envelope.
//! - [`EventPersistence`]: background task writing every event to the
//!   `activity_log` table.

pub mod bus;
pub mod persistence;

pub use bus::{EventBus, PortalEvent};
pub use persistence::{EventPersistence, PersistenceStats};

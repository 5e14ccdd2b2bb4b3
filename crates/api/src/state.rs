use std::sync::Arc;

use crate::config::ServerConfig;
use crate::gateway::PaymentGateway;
use crate::storage::ObjectStore;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: campus_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Publishes portal activity; persisted by `EventPersistence`.
    pub event_bus: Arc<campus_events::EventBus>,
    /// Hosted-checkout client.
    pub gateway: Arc<dyn PaymentGateway>,
    /// Binary object store for uploads.
    pub store: Arc<dyn ObjectStore>,
}

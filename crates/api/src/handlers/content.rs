//! Shared helpers for the admin-managed public content handlers.

use campus_core::types::DbId;
use campus_core::validation::validate_display_order;
use campus_events::PortalEvent;

use crate::error::AppResult;
use crate::state::AppState;

pub const ACTION_CREATED: &str = "created";
pub const ACTION_UPDATED: &str = "updated";
pub const ACTION_DELETED: &str = "deleted";

/// Validate an optional `display_order`.
pub fn check_display_order(order: Option<i32>) -> AppResult<()> {
    if let Some(order) = order {
        validate_display_order(order)?;
    }
    Ok(())
}

/// Publish `content.changed` and log the change.
pub fn content_changed(state: &AppState, entity_type: &str, id: DbId, action: &str, actor: DbId) {
    tracing::info!(entity_type, id, action, admin_id = actor, "Content changed");
    state
        .event_bus
        .publish(PortalEvent::content_changed(entity_type, id, action, actor));
}

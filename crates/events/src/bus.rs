//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` in the application state.
//! Handlers publish after their write has committed; delivery is best
//! effort and never fails the request.

use campus_core::types::{DbId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

pub const ENROLLMENT_CREATED: &str = "enrollment.created";
pub const QUIZ_SUBMITTED: &str = "quiz.submitted";
pub const PAYMENT_SUCCEEDED: &str = "payment.succeeded";
pub const CERTIFICATE_ISSUED: &str = "certificate.issued";
pub const CONTENT_CHANGED: &str = "content.changed";

// ---------------------------------------------------------------------------
// PortalEvent
// ---------------------------------------------------------------------------

/// Something that happened on the portal worth recording.
///
/// Built with [`PortalEvent::new`] and the `with_*` builder methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalEvent {
    /// Dot-separated event name, e.g. `"quiz.submitted"`.
    pub event_type: String,
    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,
    /// The user whose action triggered the event.
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub timestamp: Timestamp,
}

impl PortalEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// A `content.changed` event for an admin-managed public table.
    ///
    /// `action` is one of `created`, `updated` or `deleted`.
    pub fn content_changed(entity_type: &str, entity_id: DbId, action: &str, actor: DbId) -> Self {
        Self::new(CONTENT_CHANGED)
            .with_source(entity_type, entity_id)
            .with_actor(actor)
            .with_payload(serde_json::json!({ "action": action }))
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 1024;

/// Fan-out event bus.
///
/// When the buffer is full the oldest un-consumed events are dropped and
/// slow receivers observe `RecvError::Lagged`.
pub struct EventBus {
    sender: broadcast::Sender<PortalEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped silently when nobody listens.
    pub fn publish(&self, event: PortalEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Event published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PortalEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_receives_enriched_event() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            PortalEvent::new(QUIZ_SUBMITTED)
                .with_source("quiz_submission", 42)
                .with_actor(7)
                .with_payload(serde_json::json!({"score": 80})),
        );

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.event_type, "quiz.submitted");
        assert_eq!(received.source_entity_type.as_deref(), Some("quiz_submission"));
        assert_eq!(received.source_entity_id, Some(42));
        assert_eq!(received.actor_user_id, Some(7));
        assert_eq!(received.payload["score"], 80);
    }

    #[tokio::test]
    async fn every_subscriber_sees_each_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(PortalEvent::new(ENROLLMENT_CREATED));

        assert_eq!(rx1.recv().await.unwrap().event_type, ENROLLMENT_CREATED);
        assert_eq!(rx2.recv().await.unwrap().event_type, ENROLLMENT_CREATED);
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = EventBus::default();
        bus.publish(PortalEvent::new(PAYMENT_SUCCEEDED));
    }

    #[test]
    fn new_event_has_empty_object_payload() {
        let event = PortalEvent::new(CERTIFICATE_ISSUED);
        assert!(event.source_entity_type.is_none());
        assert!(event.actor_user_id.is_none());
        assert!(event.payload.is_object());
    }

    #[test]
    fn content_changed_carries_action() {
        let event = PortalEvent::content_changed("news", 3, "deleted", 1);
        assert_eq!(event.event_type, CONTENT_CHANGED);
        assert_eq!(event.source_entity_type.as_deref(), Some("news"));
        assert_eq!(event.source_entity_id, Some(3));
        assert_eq!(event.payload["action"], "deleted");
    }
}

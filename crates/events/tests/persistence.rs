use std::sync::Arc;

use campus_db::repositories::ActivityRepo;
use campus_events::bus::{CONTENT_CHANGED, ENROLLMENT_CREATED};
use campus_events::{EventBus, EventPersistence, PortalEvent};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn persist_writes_an_activity_row(pool: PgPool) {
    let event = PortalEvent::new(ENROLLMENT_CREATED)
        .with_source("enrollment", 11)
        .with_payload(serde_json::json!({"course_id": 5}));

    let id = EventPersistence::persist(&pool, &event).await.unwrap();
    assert!(id > 0);

    let recent = ActivityRepo::recent(&pool, 10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].event_type, ENROLLMENT_CREATED);
    assert_eq!(recent[0].source_entity_type.as_deref(), Some("enrollment"));
    assert_eq!(recent[0].source_entity_id, Some(11));
    assert_eq!(recent[0].payload["course_id"], 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_drains_the_bus_until_it_closes(pool: PgPool) {
    let bus = Arc::new(EventBus::default());
    let rx = bus.subscribe();
    let task = tokio::spawn(EventPersistence::run(pool.clone(), rx));

    bus.publish(PortalEvent::new(CONTENT_CHANGED).with_source("news", 1));
    bus.publish(PortalEvent::new(CONTENT_CHANGED).with_source("news", 2));
    drop(bus);

    let stats = task.await.unwrap();
    assert_eq!(stats.persisted, 2);
    assert_eq!(stats.failed, 0);

    let recent = ActivityRepo::recent(&pool, 10).await.unwrap();
    assert_eq!(recent.len(), 2);
}

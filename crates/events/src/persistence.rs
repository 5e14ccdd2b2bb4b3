//! Writes every [`PortalEvent`] on the bus to `activity_log`.

use campus_core::types::DbId;
use campus_db::repositories::ActivityRepo;
use campus_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::PortalEvent;

/// Counters reported when the persistence loop ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceStats {
    pub persisted: u64,
    pub failed: u64,
    /// Events the receiver fell too far behind to see.
    pub lagged: u64,
}

pub struct EventPersistence;

impl EventPersistence {
    /// Drain `receiver` into the database until every sender is dropped.
    ///
    /// A failed insert is logged and counted; the loop keeps going.
    pub async fn run(
        pool: DbPool,
        mut receiver: broadcast::Receiver<PortalEvent>,
    ) -> PersistenceStats {
        let mut stats = PersistenceStats::default();
        loop {
            match receiver.recv().await {
                Ok(event) => match Self::persist(&pool, &event).await {
                    Ok(_) => stats.persisted += 1,
                    Err(e) => {
                        stats.failed += 1;
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to persist activity event",
                        );
                    }
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    stats.lagged += n;
                    tracing::warn!(skipped = n, "Activity log fell behind the event bus");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::info!(
            persisted = stats.persisted,
            failed = stats.failed,
            lagged = stats.lagged,
            "Event persistence stopped",
        );
        stats
    }

    /// Insert one `activity_log` row for `event`.
    pub async fn persist(pool: &DbPool, event: &PortalEvent) -> Result<DbId, sqlx::Error> {
        ActivityRepo::insert(
            pool,
            &event.event_type,
            event.source_entity_type.as_deref(),
            event.source_entity_id,
            event.actor_user_id,
            &event.payload,
            event.timestamp,
        )
        .await
    }
}

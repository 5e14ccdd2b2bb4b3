//! Repository for the `activity_log` table.

use campus_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::activity::ActivityEntry;

const COLUMNS: &str = "id, event_type, source_entity_type, source_entity_id, actor_user_id, \
                        payload, occurred_at";

pub struct ActivityRepo;

impl ActivityRepo {
    /// Append one entry. Returns the new row ID.
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        payload: &serde_json::Value,
        occurred_at: Timestamp,
    ) -> Result<DbId, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO activity_log
                (event_type, source_entity_type, source_entity_id, actor_user_id, payload, occurred_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(event_type)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(actor_user_id)
        .bind(payload)
        .bind(occurred_at)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    /// The most recent entries, newest first.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_log ORDER BY occurred_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}

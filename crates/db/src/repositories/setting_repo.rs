use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::setting::SiteSetting;

const COLUMNS: &str = "key, value, updated_by, created_at, updated_at";

/// Key/value site configuration (hero text, certificate template, ...).
pub struct SettingRepo;

impl SettingRepo {
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<SiteSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings WHERE key = $1");
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<SiteSetting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_settings ORDER BY key");
        sqlx::query_as::<_, SiteSetting>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace the value stored under `key`.
    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        value: &serde_json::Value,
        updated_by: DbId,
    ) -> Result<SiteSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_settings (key, value, updated_by)
             VALUES ($1, $2, $3)
             ON CONFLICT (key) DO UPDATE SET
                value = EXCLUDED.value,
                updated_by = EXCLUDED.updated_by
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteSetting>(&query)
            .bind(key)
            .bind(value)
            .bind(updated_by)
            .fetch_one(pool)
            .await
    }
}

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::personnel::{CreatePersonnel, Personnel, UpdatePersonnel};

const COLUMNS: &str = "id, full_name, position, department, bio, photo_url, is_active, \
                        display_order, created_at, updated_at";

/// Staff directory. Inactive staff are hidden from the public list.
pub struct PersonnelRepo;

impl PersonnelRepo {
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Personnel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM personnel
             WHERE ($1 = false OR is_active = true)
             ORDER BY display_order, created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Personnel>(&query)
            .bind(active_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        active_only: bool,
    ) -> Result<Option<Personnel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM personnel WHERE id = $1 AND ($2 = false OR is_active = true)"
        );
        sqlx::query_as::<_, Personnel>(&query)
            .bind(id)
            .bind(active_only)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreatePersonnel) -> Result<Personnel, sqlx::Error> {
        let query = format!(
            "INSERT INTO personnel
                (full_name, position, department, bio, photo_url, is_active, display_order)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true), COALESCE($7, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Personnel>(&query)
            .bind(input.full_name.trim())
            .bind(input.position.trim())
            .bind(&input.department)
            .bind(&input.bio)
            .bind(&input.photo_url)
            .bind(input.is_active)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePersonnel,
    ) -> Result<Option<Personnel>, sqlx::Error> {
        let query = format!(
            "UPDATE personnel SET
                full_name = COALESCE($2, full_name),
                position = COALESCE($3, position),
                department = COALESCE($4, department),
                bio = COALESCE($5, bio),
                photo_url = COALESCE($6, photo_url),
                is_active = COALESCE($7, is_active),
                display_order = COALESCE($8, display_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Personnel>(&query)
            .bind(id)
            .bind(input.full_name.as_deref().map(str::trim))
            .bind(input.position.as_deref().map(str::trim))
            .bind(&input.department)
            .bind(&input.bio)
            .bind(&input.photo_url)
            .bind(input.is_active)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM personnel WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

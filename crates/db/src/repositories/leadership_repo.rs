use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::leadership::{CreateLeader, Leader, UpdateLeader};

const COLUMNS: &str = "id, full_name, rank, title, tenure_start, tenure_end, biography, \
                        photo_url, is_current, display_order, created_at, updated_at";

/// Chronicle of command: past and current leadership.
pub struct LeadershipRepo;

impl LeadershipRepo {
    /// Current leaders first, then by `display_order` and most recent tenure.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Leader>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leadership
             ORDER BY is_current DESC, display_order, tenure_start DESC NULLS LAST, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Leader>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Leader>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leadership WHERE id = $1");
        sqlx::query_as::<_, Leader>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateLeader) -> Result<Leader, sqlx::Error> {
        let query = format!(
            "INSERT INTO leadership
                (full_name, rank, title, tenure_start, tenure_end, biography, photo_url,
                 is_current, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, false), COALESCE($9, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Leader>(&query)
            .bind(input.full_name.trim())
            .bind(&input.rank)
            .bind(input.title.trim())
            .bind(input.tenure_start)
            .bind(input.tenure_end)
            .bind(&input.biography)
            .bind(&input.photo_url)
            .bind(input.is_current)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLeader,
    ) -> Result<Option<Leader>, sqlx::Error> {
        let query = format!(
            "UPDATE leadership SET
                full_name = COALESCE($2, full_name),
                rank = COALESCE($3, rank),
                title = COALESCE($4, title),
                tenure_start = COALESCE($5, tenure_start),
                tenure_end = COALESCE($6, tenure_end),
                biography = COALESCE($7, biography),
                photo_url = COALESCE($8, photo_url),
                is_current = COALESCE($9, is_current),
                display_order = COALESCE($10, display_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Leader>(&query)
            .bind(id)
            .bind(input.full_name.as_deref().map(str::trim))
            .bind(&input.rank)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.tenure_start)
            .bind(input.tenure_end)
            .bind(&input.biography)
            .bind(&input.photo_url)
            .bind(input.is_current)
            .bind(input.display_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM leadership WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
